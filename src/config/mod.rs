//! Server configuration loaded from the environment.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::UiForgeError;
use crate::provider::anthropic::DEFAULT_MODEL;
use crate::session::{EvictionPolicy, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL};

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";
pub const MODEL_VAR: &str = "UIFORGE_MODEL";
pub const HTTP_ADDR_VAR: &str = "UIFORGE_HTTP_ADDR";
pub const MAX_SESSIONS_VAR: &str = "UIFORGE_MAX_SESSIONS";
pub const SESSION_TTL_VAR: &str = "UIFORGE_SESSION_TTL_SECS";

/// Default bind address of the HTTP façade.
pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8787";

/// Resolved server settings.
#[derive(Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub http_addr: SocketAddr,
    pub max_sessions: usize,
    pub session_ttl: Duration,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("http_addr", &self.http_addr)
            .field("max_sessions", &self.max_sessions)
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

impl ServerConfig {
    /// Load from process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, UiForgeError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, UiForgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = var(API_KEY_VAR).ok_or_else(|| {
            UiForgeError::Configuration(format!("{API_KEY_VAR} must be set"))
        })?;

        let http_addr = var(HTTP_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string())
            .parse()
            .map_err(|e| UiForgeError::Configuration(format!("invalid {HTTP_ADDR_VAR}: {e}")))?;

        let max_sessions = match var(MAX_SESSIONS_VAR) {
            Some(raw) => parse_positive(MAX_SESSIONS_VAR, &raw)? as usize,
            None => DEFAULT_MAX_SESSIONS,
        };
        let session_ttl = match var(SESSION_TTL_VAR) {
            Some(raw) => Duration::from_secs(parse_positive(SESSION_TTL_VAR, &raw)?),
            None => DEFAULT_SESSION_TTL,
        };

        Ok(Self {
            api_key,
            base_url: var(BASE_URL_VAR),
            model: var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            http_addr,
            max_sessions,
            session_ttl,
        })
    }

    pub fn eviction_policy(&self) -> EvictionPolicy {
        EvictionPolicy {
            max_sessions: self.max_sessions,
            max_age: self.session_ttl,
        }
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u64, UiForgeError> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(UiForgeError::Configuration(format!(
            "{name} must be a positive integer, got '{raw}'"
        ))),
    }
}
