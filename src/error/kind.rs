//! Error classification surfaced in tool metadata.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Broad error category reported alongside failed invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing tool arguments. Never reaches the provider.
    Validation,
    /// The invocation was cancelled before it started.
    Cancelled,
    /// The generation call failed (auth, quota, network, malformed response).
    Provider,
    /// Anything else.
    Internal,
}
