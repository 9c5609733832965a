//! Domain Events
//!
//! One event per finalized trigger decision, handed to the alerting
//! channel after the decision can no longer change. Alert delivery is
//! best-effort and never feeds back into admission.

use serde::Serialize;

use crate::domain::value_objects::{CallerIdentity, ExecutionId};

/// Event describing how one trigger request ended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum TriggerEvent {
    /// Admitted and the pipeline execution started
    #[serde(rename_all = "camelCase")]
    Admitted {
        identity: CallerIdentity,
        execution_id: ExecutionId,
    },
    /// Denied: the identity's quota window is full
    #[serde(rename_all = "camelCase")]
    Denied {
        identity: CallerIdentity,
        live_count: u32,
        retry_after_secs: u64,
    },
    /// Admitted but the pipeline start failed; the quota unit stays consumed
    #[serde(rename_all = "camelCase")]
    ExecutionFailed {
        identity: CallerIdentity,
        error: String,
    },
}

impl TriggerEvent {
    /// Human-readable subject line for the alert channel
    pub fn subject(&self) -> &'static str {
        match self {
            Self::Admitted { .. } => "Pipeline triggered via public endpoint",
            Self::Denied { .. } => "Pipeline trigger denied, quota exhausted",
            Self::ExecutionFailed { .. } => "Pipeline trigger failed after admission",
        }
    }

    /// Identity the event is about
    pub fn identity(&self) -> &CallerIdentity {
        match self {
            Self::Admitted { identity, .. }
            | Self::Denied { identity, .. }
            | Self::ExecutionFailed { identity, .. } => identity,
        }
    }
}
