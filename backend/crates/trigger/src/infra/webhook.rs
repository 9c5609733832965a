//! Webhook Alert Publisher Implementation

use serde::Serialize;

use crate::domain::events::TriggerEvent;
use crate::domain::repository::AlertPublisher;
use crate::error::{TriggerError, TriggerResult};

/// Envelope posted to the alert webhook
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertEnvelope<'a> {
    subject: &'a str,
    pipeline: &'a str,
    #[serde(flatten)]
    event: &'a TriggerEvent,
}

/// Webhook-backed alert publisher
///
/// Posts one JSON envelope per finalized decision. Callers treat
/// delivery as best-effort; a failure here never changes a decision.
#[derive(Clone)]
pub struct WebhookAlertPublisher {
    client: reqwest::Client,
    url: String,
    pipeline: String,
}

impl WebhookAlertPublisher {
    pub fn new(client: reqwest::Client, url: impl Into<String>, pipeline: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            pipeline: pipeline.into(),
        }
    }
}

impl AlertPublisher for WebhookAlertPublisher {
    async fn publish(&self, event: &TriggerEvent) -> TriggerResult<()> {
        let envelope = AlertEnvelope {
            subject: event.subject(),
            pipeline: &self.pipeline,
            event,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| TriggerError::Notify(format!("webhook delivery failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TriggerError::Notify(format!(
                "webhook returned status: {}",
                response.status()
            )));
        }

        tracing::debug!(subject = envelope.subject, "Alert delivered");
        Ok(())
    }
}

/// No-op publisher for deployments without an alert channel
#[derive(Debug, Clone, Default)]
pub struct NullAlertPublisher;

impl AlertPublisher for NullAlertPublisher {
    async fn publish(&self, event: &TriggerEvent) -> TriggerResult<()> {
        tracing::debug!(
            subject = event.subject(),
            identity = %event.identity(),
            "Alert channel not configured, event dropped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CallerIdentity, ExecutionId};

    #[test]
    fn test_envelope_shape() {
        let event = TriggerEvent::Admitted {
            identity: CallerIdentity::new("203.0.113.5").unwrap(),
            execution_id: ExecutionId::new("exec-42"),
        };
        let envelope = AlertEnvelope {
            subject: event.subject(),
            pipeline: "site-deploy",
            event: &event,
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["subject"], "Pipeline triggered via public endpoint");
        assert_eq!(json["pipeline"], "site-deploy");
        assert_eq!(json["event"], "admitted");
        assert_eq!(json["identity"], "203.0.113.5");
        assert_eq!(json["executionId"], "exec-42");
    }
}
