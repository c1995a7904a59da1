//! Attach-target value object.
//!
//! A [`Target`] identifies one attachable process. Identity (and therefore
//! history deduplication) is the case-insensitive (path, user, server)
//! triple: reattaching the same executable as the same user on the same
//! machine is the same logical target even though the pid changed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque debugger-engine identifier carried alongside a target so a
/// reattach can request the same engine. The host assigns it; this crate
/// only stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(pub String);

/// One attachable process: a live attach candidate or a history entry.
///
/// `process_id` and `is_attached` describe the current session and are
/// excluded from identity; `engine` is opaque host state.
#[derive(Debug, Clone)]
pub struct Target {
    pub process_id: i32,
    /// Last segment of `process_path`, or the raw path when no segment can
    /// be extracted. Derivation never fails.
    pub process_name: String,
    pub process_path: String,
    pub process_user: String,
    /// Empty for local targets.
    pub server_name: String,
    pub is_attached: bool,
    pub engine: Option<EngineId>,
}

impl Target {
    /// Build a target. No validation: pid may be any integer, path any
    /// string including empty. `user` and `server_name` are stored verbatim
    /// (callers pass `""` when absent).
    pub fn new(pid: i32, path: &str, user: &str, server_name: &str) -> Self {
        Target {
            process_id: pid,
            process_name: derive_process_name(path),
            process_path: path.to_string(),
            process_user: user.to_string(),
            server_name: server_name.to_string(),
            is_attached: false,
            engine: None,
        }
    }

    /// Shorthand for a target with no server (the common case).
    pub fn local(pid: i32, path: &str, user: &str) -> Self {
        Target::new(pid, path, user, "")
    }

    pub fn is_local(&self) -> bool {
        self.server_name.is_empty()
    }
}

/// Best-effort filename extraction. Accepts both separator styles since
/// stored paths may come from a Windows host.
fn derive_process_name(path: &str) -> String {
    match path.rsplit(['\\', '/']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => path.to_string(),
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.process_path.to_lowercase() == other.process_path.to_lowercase()
            && self.process_user.to_lowercase() == other.process_user.to_lowercase()
            && self.server_name.to_lowercase() == other.server_name.to_lowercase()
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.process_path.to_lowercase().hash(state);
        self.process_user.to_lowercase().hash(state);
        self.server_name.to_lowercase().hash(state);
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_local() {
            write!(f, "{} ({})", self.process_name, self.process_user)
        } else {
            write!(
                f,
                "{} ({}@{})",
                self.process_name, self.process_user, self.server_name
            )
        }
    }
}
