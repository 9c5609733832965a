//! Domain Value Objects

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;

use crate::error::{TriggerError, TriggerResult};

/// CallerIdentity value object - the quota accounting key
///
/// A stable, opaque string derived from the transport-level caller
/// address. Equal callers always derive equal identities; beyond
/// equality the rest of the domain never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CallerIdentity(String);

impl CallerIdentity {
    /// Upper bound on identity length (IPv6 text form needs 45 bytes)
    pub const MAX_LENGTH: usize = 64;

    /// Create a validated identity from a raw string
    pub fn new(value: impl Into<String>) -> TriggerResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(TriggerError::InvalidIdentity(
                "identity is empty".to_string(),
            ));
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(TriggerError::InvalidIdentity(format!(
                "identity exceeds {} bytes",
                Self::MAX_LENGTH
            )));
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TriggerError::InvalidIdentity(
                "identity contains whitespace or control characters".to_string(),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Derive the identity from a caller address
    ///
    /// `IpAddr`'s Display form is canonical (IPv6 lowercased and
    /// compressed), so equal addresses always render equal identities.
    pub fn from_ip(ip: IpAddr) -> Self {
        Self(ip.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PipelineRef value object - name of the downstream pipeline to start
///
/// Restricted to a URL-path-safe charset because the gateway embeds it
/// verbatim in the start-execution request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineRef(String);

impl PipelineRef {
    pub const MAX_LENGTH: usize = 128;

    /// Create a validated pipeline reference
    pub fn new(value: impl Into<String>) -> TriggerResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(TriggerError::InvalidPipelineRef(
                "pipeline name is empty".to_string(),
            ));
        }
        if trimmed.len() > Self::MAX_LENGTH {
            return Err(TriggerError::InvalidPipelineRef(format!(
                "pipeline name exceeds {} bytes",
                Self::MAX_LENGTH
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(TriggerError::InvalidPipelineRef(format!(
                "pipeline name contains characters outside [A-Za-z0-9._-]: {}",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PipelineRef {
    /// Development default; production deployments name their pipeline
    /// through configuration
    fn default() -> Self {
        Self("deploy".to_string())
    }
}

impl fmt::Display for PipelineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ExecutionId value object - downstream identifier of a started run
///
/// Minted by the pipeline server; opaque to this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionId(String);

impl ExecutionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// AdmitOutcome value object - result of the store's atomic check-and-create
///
/// `live_count` includes the candidate record when `admitted` is true.
/// `window_resets_at_ms` is when the identity's oldest live record
/// expires (the earliest instant a denied caller can succeed again).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmitOutcome {
    pub admitted: bool,
    pub live_count: u32,
    pub window_resets_at_ms: i64,
}

/// QuotaDecision value object - one finalized admit/deny verdict
///
/// Derived at evaluation time and never stored; only admitted usage
/// records persist.
#[derive(Debug, Clone)]
pub struct QuotaDecision {
    pub identity: CallerIdentity,
    pub admitted: bool,
    pub live_count: u32,
    pub limit: u32,
    pub window_resets_at_ms: i64,
}

impl QuotaDecision {
    /// Admissions left in the current window
    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.live_count)
    }
}
