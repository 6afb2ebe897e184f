//! Condition types and reasons written into Gateway, listener and route status.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Condition status following Kubernetes conventions
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ConditionStatus {
    True,
    False,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
        }
    }
}

impl Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod gateway {
    pub const SCHEDULED: &str = "Scheduled";
    pub const READY: &str = "Ready";

    pub const REASON_SCHEDULED: &str = "Scheduled";
    pub const REASON_READY: &str = "Ready";
}

pub mod listener {
    pub const DETACHED: &str = "Detached";
    pub const RESOLVED_REFS: &str = "ResolvedRefs";
    pub const READY: &str = "Ready";

    pub const REASON_ATTACHED: &str = "Attached";
    pub const REASON_UNSUPPORTED_PROTOCOL: &str = "UnsupportedProtocol";
    pub const REASON_RESOLVED_REFS: &str = "ResolvedRefs";
    pub const REASON_READY: &str = "Ready";
    pub const REASON_PENDING: &str = "Pending";
    pub const REASON_INVALID: &str = "Invalid";
}

pub mod route {
    pub const ACCEPTED: &str = "Accepted";
    pub const RESOLVED_REFS: &str = "ResolvedRefs";

    pub const REASON_ACCEPTED: &str = "Accepted";
    pub const REASON_RESOLVED_REFS: &str = "ResolvedRefs";
    pub const REASON_BACKEND_NOT_FOUND: &str = "BackendNotFound";
}
