//! Error types for uiforge.

pub mod kind;

pub use kind::ErrorKind;

use thiserror::Error;

/// Primary error type for all uiforge operations.
#[derive(Error, Debug)]
pub enum UiForgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid arguments for '{tool}': {message}")]
    Validation { tool: String, message: String },

    #[error("Invocation of '{0}' was cancelled before it started")]
    Cancelled(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UiForgeError {
    /// Create a validation error for a tool.
    pub fn validation(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create an API error from a status code and body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a provider error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify this error into the tool-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::UnknownTool(_) => ErrorKind::Validation,
            Self::Cancelled(_) => ErrorKind::Cancelled,
            Self::Api { .. }
            | Self::Network(_)
            | Self::Authentication(_)
            | Self::RateLimited { .. }
            | Self::Stream(_)
            | Self::Provider { .. } => ErrorKind::Provider,
            Self::Configuration(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::NotFound(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the error was raised before any provider call was issued.
    pub fn is_local(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Cancelled)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, UiForgeError>;
