//! HTTP Pipeline Gateway Implementation

use serde::Deserialize;

use crate::domain::repository::PipelineGateway;
use crate::domain::value_objects::{ExecutionId, PipelineRef};
use crate::error::{TriggerError, TriggerResult};

/// Cap on refusal detail carried into errors and logs
const DETAIL_MAX_CHARS: usize = 200;

/// Success body of a start-execution call
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartExecutionResponse {
    execution_id: String,
}

/// HTTP-backed pipeline gateway
///
/// Speaks the pipeline server's REST surface:
/// `POST {base_url}/pipelines/{pipeline}/executions`. A 2xx with an
/// execution id means started; any 4xx is an explicit refusal; anything
/// else (network failure, timeout, 5xx, malformed body) is transient
/// unavailability.
#[derive(Clone)]
pub struct HttpPipelineGateway {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpPipelineGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        bearer_token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token,
        }
    }

    fn execution_url(&self, pipeline: &PipelineRef) -> String {
        format!("{}/pipelines/{}/executions", self.base_url, pipeline)
    }
}

impl PipelineGateway for HttpPipelineGateway {
    async fn start(&self, pipeline: &PipelineRef) -> TriggerResult<ExecutionId> {
        let url = self.execution_url(pipeline);

        let mut request = self.client.post(&url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TriggerError::PipelineUnavailable(format!("start-execution timed out: {}", e))
            } else {
                TriggerError::PipelineUnavailable(format!("start-execution failed: {}", e))
            }
        })?;

        let status = response.status();

        if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(
                pipeline = %pipeline,
                status = %status,
                "Pipeline refused the execution"
            );
            return Err(TriggerError::PipelineRejected(format!(
                "{}: {}",
                status,
                truncate_detail(&detail)
            )));
        }

        if !status.is_success() {
            tracing::warn!(
                pipeline = %pipeline,
                status = %status,
                "Pipeline server error"
            );
            return Err(TriggerError::PipelineUnavailable(format!(
                "pipeline returned {}",
                status
            )));
        }

        let body: StartExecutionResponse = response.json().await.map_err(|e| {
            TriggerError::PipelineUnavailable(format!(
                "malformed start-execution response: {}",
                e
            ))
        })?;

        if body.execution_id.is_empty() {
            return Err(TriggerError::PipelineUnavailable(
                "start-execution response carried an empty execution id".to_string(),
            ));
        }

        Ok(ExecutionId::new(body.execution_id))
    }
}

fn truncate_detail(detail: &str) -> String {
    detail.chars().take(DETAIL_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_url_joins_cleanly() {
        let client = reqwest::Client::new();
        let gw = HttpPipelineGateway::new(client.clone(), "http://pipelines.internal/", None);
        let pipeline = PipelineRef::new("site-deploy").unwrap();
        assert_eq!(
            gw.execution_url(&pipeline),
            "http://pipelines.internal/pipelines/site-deploy/executions"
        );

        let gw = HttpPipelineGateway::new(client, "http://pipelines.internal", None);
        assert_eq!(
            gw.execution_url(&pipeline),
            "http://pipelines.internal/pipelines/site-deploy/executions"
        );
    }

    #[test]
    fn test_truncate_detail_caps_length() {
        let long = "x".repeat(1000);
        assert_eq!(truncate_detail(&long).len(), DETAIL_MAX_CHARS);
        assert_eq!(truncate_detail("short"), "short");
    }

    #[test]
    fn test_response_body_shape() {
        let body: StartExecutionResponse =
            serde_json::from_str(r#"{"executionId":"exec-0017"}"#).unwrap();
        assert_eq!(body.execution_id, "exec-0017");
    }
}
