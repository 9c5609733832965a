//! API DTOs (Data Transfer Objects)

use kernel::error::kind::ErrorKind;
use serde::Serialize;

/// Response for POST /api/trigger when the pipeline was started
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerAcceptedResponse {
    pub message: &'static str,
    pub execution_id: String,
    pub remaining: u32,
}

/// Response for POST /api/trigger when admission succeeded but the
/// pipeline start failed (still 200: the quota unit is consumed)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerFailedResponse {
    pub message: &'static str,
    pub error: ErrorKind,
}

/// Response for POST /api/trigger when the quota window is full
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerDeniedResponse {
    pub message: String,
    pub used: u32,
    pub limit: u32,
    pub retry_after_secs: u64,
}

/// Response for GET /api/trigger/quota
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatusResponse {
    pub used: u32,
    pub limit: u32,
    /// Expiry of the oldest live record; absent when nothing is live
    pub resets_at_ms: Option<i64>,
}
