//! Command line interface.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

/// uiforge MCP server
#[derive(Parser, Debug)]
#[command(name = "uiforge", version, about = "MCP server for AI-backed UI generation")]
pub struct Cli {
    /// Model id sent to the provider (overrides UIFORGE_MODEL)
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Transport to serve on.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Stdio,
    /// Serve the HTTP façade
    Http(HttpArgs),
}

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
pub struct HttpArgs {
    /// Listen address (overrides UIFORGE_HTTP_ADDR)
    #[arg(long)]
    pub addr: Option<SocketAddr>,
}

impl Cli {
    /// The selected transport, `stdio` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Stdio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_stdio() {
        let cli = Cli::try_parse_from(["uiforge"]).unwrap();
        assert_eq!(cli.command(), Commands::Stdio);
    }

    #[test]
    fn parses_http_addr() {
        let cli = Cli::try_parse_from(["uiforge", "http", "--addr", "0.0.0.0:3000"]).unwrap();
        match cli.command() {
            Commands::Http(args) => assert_eq!(args.addr.unwrap().port(), 3000),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn model_flag_is_global() {
        let cli = Cli::try_parse_from(["uiforge", "stdio", "--model", "claude-haiku-4-5"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("claude-haiku-4-5"));
    }

    #[test]
    fn rejects_bad_addr() {
        assert!(Cli::try_parse_from(["uiforge", "http", "--addr", "nope"]).is_err());
    }
}
