//! Request Trigger Use Case
//!
//! Orchestrates one inbound trigger request end to end: derive the
//! caller identity, take the quota decision, start the downstream
//! pipeline on admission, and report the outcome. The flow is strictly
//! linear; denial and downstream failure are terminal outcomes, not
//! errors, and a consumed quota unit is never refunded.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;
use kernel::error::kind::ErrorKind;
use kernel::id::TriggerRequestId;

use crate::application::config::TriggerConfig;
use crate::application::evaluate_quota::EvaluateQuotaUseCase;
use crate::domain::events::TriggerEvent;
use crate::domain::repository::{AlertPublisher, PipelineGateway, QuotaStore};
use crate::domain::services::retry_after_secs;
use crate::domain::value_objects::{CallerIdentity, ExecutionId, QuotaDecision};
use crate::error::{TriggerError, TriggerResult};

/// Input for one trigger request
#[derive(Debug, Clone)]
pub struct TriggerRequestInput {
    /// Transport-level caller address, if the front door could derive one
    pub caller_addr: Option<IpAddr>,
}

/// Terminal outcome of one trigger request
#[derive(Debug, Clone)]
pub enum TriggerOutcome {
    /// Admitted and the pipeline execution started
    Triggered {
        decision: QuotaDecision,
        execution_id: ExecutionId,
    },
    /// Admitted but the pipeline start failed; the quota unit stays consumed
    TriggerFailed {
        decision: QuotaDecision,
        error_kind: ErrorKind,
        error_detail: String,
    },
    /// Denied: quota window full for this identity
    Denied {
        decision: QuotaDecision,
        retry_after_secs: u64,
    },
}

/// Request Trigger Use Case
pub struct RequestTriggerUseCase<S, P, N>
where
    S: QuotaStore,
    P: PipelineGateway,
    N: AlertPublisher,
{
    store: Arc<S>,
    pipeline_gw: Arc<P>,
    alerts: Arc<N>,
    config: Arc<TriggerConfig>,
}

impl<S, P, N> RequestTriggerUseCase<S, P, N>
where
    S: QuotaStore,
    P: PipelineGateway,
    N: AlertPublisher,
{
    pub fn new(store: Arc<S>, pipeline_gw: Arc<P>, alerts: Arc<N>, config: Arc<TriggerConfig>) -> Self {
        Self {
            store,
            pipeline_gw,
            alerts,
            config,
        }
    }

    pub async fn execute(&self, input: TriggerRequestInput) -> TriggerResult<TriggerOutcome> {
        let request_id = TriggerRequestId::new();

        // Identity first; a request without one never touches the store
        let identity = match input.caller_addr {
            Some(addr) => CallerIdentity::from_ip(addr),
            None => {
                return Err(TriggerError::InvalidIdentity(
                    "caller address could not be derived".to_string(),
                ));
            }
        };

        let evaluator = EvaluateQuotaUseCase::new(self.store.clone(), self.config.clone());
        let decision = evaluator.execute(&identity).await?;

        if !decision.admitted {
            let retry_secs =
                retry_after_secs(decision.window_resets_at_ms, Utc::now().timestamp_millis());

            self.notify(TriggerEvent::Denied {
                identity: identity.clone(),
                live_count: decision.live_count,
                retry_after_secs: retry_secs,
            })
            .await;

            tracing::info!(
                request_id = %request_id,
                identity = %identity,
                retry_after_secs = retry_secs,
                "Trigger request denied"
            );

            return Ok(TriggerOutcome::Denied {
                decision,
                retry_after_secs: retry_secs,
            });
        }

        // The quota unit is consumed from here on, whatever the pipeline does
        match self.pipeline_gw.start(&self.config.pipeline).await {
            Ok(execution_id) => {
                self.notify(TriggerEvent::Admitted {
                    identity: identity.clone(),
                    execution_id: execution_id.clone(),
                })
                .await;

                tracing::info!(
                    request_id = %request_id,
                    identity = %identity,
                    pipeline = %self.config.pipeline,
                    execution_id = %execution_id,
                    "Pipeline execution started"
                );

                Ok(TriggerOutcome::Triggered {
                    decision,
                    execution_id,
                })
            }
            Err(
                err @ (TriggerError::PipelineUnavailable(_) | TriggerError::PipelineRejected(_)),
            ) => {
                let error_kind = err.kind();
                let error_detail = err.to_string();

                self.notify(TriggerEvent::ExecutionFailed {
                    identity: identity.clone(),
                    error: error_detail.clone(),
                })
                .await;

                tracing::error!(
                    request_id = %request_id,
                    identity = %identity,
                    pipeline = %self.config.pipeline,
                    error = %error_detail,
                    "Pipeline start failed after admission"
                );

                Ok(TriggerOutcome::TriggerFailed {
                    decision,
                    error_kind,
                    error_detail,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Publish one decision event; delivery failure is logged and dropped
    async fn notify(&self, event: TriggerEvent) {
        if let Err(err) = self.alerts.publish(&event).await {
            tracing::warn!(
                error = %err,
                subject = event.subject(),
                identity = %event.identity(),
                "Alert delivery failed"
            );
        }
    }
}
