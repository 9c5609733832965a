//! HTTP Handlers

use crate::application::config::TriggerConfig;
use crate::application::request_trigger::{
    RequestTriggerUseCase, TriggerOutcome, TriggerRequestInput,
};
use crate::domain::repository::{AlertPublisher, PipelineGateway, QuotaStore};
use crate::domain::value_objects::CallerIdentity;
use crate::error::{TriggerError, TriggerResult};
use crate::presentation::dto::{
    QuotaStatusResponse, TriggerAcceptedResponse, TriggerDeniedResponse, TriggerFailedResponse,
};
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use platform::client::extract_client_ip;
use std::sync::Arc;

/// Shared state for trigger handlers
#[derive(Clone)]
pub struct TriggerAppState<S, P, N>
where
    S: QuotaStore + Clone + Send + Sync + 'static,
    P: PipelineGateway + Clone + Send + Sync + 'static,
    N: AlertPublisher + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub pipeline_gw: Arc<P>,
    pub alerts: Arc<N>,
    pub config: Arc<TriggerConfig>,
}

/// POST /api/trigger
pub async fn request_trigger<S, P, N>(
    State(state): State<TriggerAppState<S, P, N>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> TriggerResult<Response>
where
    S: QuotaStore + Clone + Send + Sync + 'static,
    P: PipelineGateway + Clone + Send + Sync + 'static,
    N: AlertPublisher + Clone + Send + Sync + 'static,
{
    let caller_addr = extract_client_ip(&headers, Some(addr.ip()));

    let use_case = RequestTriggerUseCase::new(
        state.store.clone(),
        state.pipeline_gw.clone(),
        state.alerts.clone(),
        state.config.clone(),
    );

    let outcome = use_case.execute(TriggerRequestInput { caller_addr }).await?;

    Ok(match outcome {
        TriggerOutcome::Triggered {
            decision,
            execution_id,
        } => (
            StatusCode::OK,
            Json(TriggerAcceptedResponse {
                message: "Pipeline execution started",
                execution_id: execution_id.as_str().to_string(),
                remaining: decision.remaining(),
            }),
        )
            .into_response(),

        TriggerOutcome::TriggerFailed { error_kind, .. } => (
            StatusCode::OK,
            Json(TriggerFailedResponse {
                message: "Admitted, but the pipeline could not be started",
                error: error_kind,
            }),
        )
            .into_response(),

        TriggerOutcome::Denied {
            decision,
            retry_after_secs,
        } => (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after_secs.to_string())],
            Json(TriggerDeniedResponse {
                message: format!(
                    "Trigger quota exceeded: max {} requests per caller per window",
                    decision.limit
                ),
                used: decision.live_count,
                limit: decision.limit,
                retry_after_secs,
            }),
        )
            .into_response(),
    })
}

/// GET /api/trigger/quota
pub async fn quota_status<S, P, N>(
    State(state): State<TriggerAppState<S, P, N>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> TriggerResult<Json<QuotaStatusResponse>>
where
    S: QuotaStore + Clone + Send + Sync + 'static,
    P: PipelineGateway + Clone + Send + Sync + 'static,
    N: AlertPublisher + Clone + Send + Sync + 'static,
{
    let identity = extract_client_ip(&headers, Some(addr.ip()))
        .map(CallerIdentity::from_ip)
        .ok_or_else(|| {
            TriggerError::InvalidIdentity("caller address could not be derived".to_string())
        })?;

    let as_of_ms = Utc::now().timestamp_millis();

    let used = state.store.count_live(&identity, as_of_ms).await?;
    let resets_at_ms = state.store.oldest_live_expiry(&identity, as_of_ms).await?;

    Ok(Json(QuotaStatusResponse {
        used,
        limit: state.config.quota_limit,
        resets_at_ms,
    }))
}
