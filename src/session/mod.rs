//! Per-session invocation metrics.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// Default cap on concurrently tracked sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 1024;
/// Default lifetime of a session entry, counted from its start.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Snapshot of one session's activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub tools_used_count: usize,
    pub tool_names: Vec<String>,
    /// `None` until at least one tool has been tracked.
    pub average_tool_time_ms: Option<f64>,
}

/// Bounds applied to the registry on every insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionPolicy {
    pub max_sessions: usize,
    pub max_age: Duration,
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            max_age: DEFAULT_SESSION_TTL,
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    started_at: Instant,
    started_wall: DateTime<Utc>,
    tool_names: Vec<String>,
}

/// Shared registry of `session id -> {start instant, tool history}`.
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
    policy: EvictionPolicy,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: EvictionPolicy) -> Self {
        Self {
            inner: Arc::default(),
            policy: EvictionPolicy {
                max_sessions: policy.max_sessions.max(1),
                ..policy
            },
        }
    }

    /// A fresh opaque session identifier.
    pub fn new_session_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SessionEntry>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SessionEntry>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start (or restart) a session.
    ///
    /// Re-using an existing id resets its start time and clears its history.
    pub fn start_session(&self, session_id: &str) {
        let mut sessions = self.write();
        self.start_locked(&mut sessions, session_id);
    }

    /// Start the session only if it is not already tracked.
    ///
    /// Check and insert share one write lock.
    pub fn ensure_session(&self, session_id: &str) {
        let mut sessions = self.write();
        if !sessions.contains_key(session_id) {
            self.start_locked(&mut sessions, session_id);
        }
    }

    fn start_locked(&self, sessions: &mut HashMap<String, SessionEntry>, session_id: &str) {
        let now = Instant::now();
        Self::evict_expired(sessions, now, self.policy.max_age);

        if !sessions.contains_key(session_id) {
            while sessions.len() >= self.policy.max_sessions {
                let Some(oldest) = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.started_at)
                    .map(|(id, _)| id.clone())
                else {
                    break;
                };
                debug!(session_id = %oldest, "evicting oldest session");
                sessions.remove(&oldest);
            }
        }

        sessions.insert(
            session_id.to_string(),
            SessionEntry {
                started_at: now,
                started_wall: Utc::now(),
                tool_names: Vec::new(),
            },
        );
    }

    /// Append a tool name to a session's history. Unknown ids are ignored.
    pub fn track_tool(&self, session_id: &str, tool_name: &str) {
        if let Some(entry) = self.write().get_mut(session_id) {
            entry.tool_names.push(tool_name.to_string());
        }
    }

    pub fn get_metrics(&self, session_id: &str) -> Option<SessionMetrics> {
        let sessions = self.read();
        let entry = sessions.get(session_id)?;
        let duration_ms = u64::try_from(entry.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        let tools_used_count = entry.tool_names.len();
        let average_tool_time_ms =
            (tools_used_count > 0).then(|| duration_ms as f64 / tools_used_count as f64);

        Some(SessionMetrics {
            started_at: entry.started_wall,
            duration_ms,
            tools_used_count,
            tool_names: entry.tool_names.clone(),
            average_tool_time_ms,
        })
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.read().contains_key(session_id)
    }

    pub fn active_count(&self) -> usize {
        self.read().len()
    }

    /// Drop every session older than the configured max age.
    ///
    /// Returns the number of sessions removed.
    pub fn prune(&self) -> usize {
        let mut sessions = self.write();
        Self::evict_expired(&mut sessions, Instant::now(), self.policy.max_age)
    }

    fn evict_expired(
        sessions: &mut HashMap<String, SessionEntry>,
        now: Instant,
        max_age: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.started_at) <= max_age);
        before - sessions.len()
    }
}
