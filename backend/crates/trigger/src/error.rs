//! Trigger Error Types
//!
//! This module provides trigger-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Quota denial is deliberately absent: a full window is a normal
//! outcome carried by `TriggerOutcome::Denied`, not an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Trigger-specific result type alias
pub type TriggerResult<T> = Result<T, TriggerError>;

/// Trigger-specific error variants
///
/// These map to appropriate HTTP status codes and can be converted to
/// `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Caller identity missing or malformed; rejected before any store access
    #[error("Invalid caller identity: {0}")]
    InvalidIdentity(String),

    /// Pipeline reference failed validation (startup configuration)
    #[error("Invalid pipeline reference: {0}")]
    InvalidPipelineRef(String),

    /// Quota store unreachable or the admission did not complete; no
    /// usage record exists without a completed admission, so the whole
    /// request is safe to retry
    #[error("Quota store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Pipeline server transiently unreachable (network, timeout, 5xx)
    #[error("Pipeline unavailable: {0}")]
    PipelineUnavailable(String),

    /// Pipeline server explicitly refused to start the execution
    #[error("Pipeline rejected execution: {0}")]
    PipelineRejected(String),

    /// Alert channel delivery failure; logged by the caller, never
    /// propagated to the requester
    #[error("Alert delivery failed: {0}")]
    Notify(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TriggerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TriggerError::InvalidIdentity(_) => StatusCode::BAD_REQUEST,
            TriggerError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            TriggerError::PipelineUnavailable(_) => StatusCode::BAD_GATEWAY,
            TriggerError::PipelineRejected(_) => StatusCode::CONFLICT,
            TriggerError::InvalidPipelineRef(_)
            | TriggerError::Notify(_)
            | TriggerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TriggerError::InvalidIdentity(_) => ErrorKind::BadRequest,
            TriggerError::Store(_) => ErrorKind::ServiceUnavailable,
            TriggerError::PipelineUnavailable(_) => ErrorKind::BadGateway,
            TriggerError::PipelineRejected(_) => ErrorKind::Conflict,
            TriggerError::InvalidPipelineRef(_)
            | TriggerError::Notify(_)
            | TriggerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether retrying the whole request from scratch is safe
    pub fn is_retriable(&self) -> bool {
        matches!(self, TriggerError::Store(_))
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TriggerError::Store(e) => {
                tracing::error!(error = %e, "Trigger quota store error");
            }
            TriggerError::Internal(msg) => {
                tracing::error!(message = %msg, "Trigger internal error");
            }
            TriggerError::InvalidPipelineRef(msg) => {
                tracing::error!(message = %msg, "Invalid pipeline reference");
            }
            TriggerError::PipelineUnavailable(msg) => {
                tracing::warn!(message = %msg, "Pipeline unavailable");
            }
            TriggerError::PipelineRejected(msg) => {
                tracing::warn!(message = %msg, "Pipeline rejected execution");
            }
            TriggerError::Notify(msg) => {
                tracing::warn!(message = %msg, "Alert delivery failed");
            }
            TriggerError::InvalidIdentity(_) => {
                tracing::debug!(error = %self, "Trigger request rejected");
            }
        }
    }
}

impl From<TriggerError> for AppError {
    fn from(err: TriggerError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for TriggerError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        // Return empty body for security (don't leak details)
        (status, ()).into_response()
    }
}
