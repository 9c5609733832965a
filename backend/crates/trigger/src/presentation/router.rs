//! Trigger Router

use crate::application::config::TriggerConfig;
use crate::domain::repository::{AlertPublisher, PipelineGateway, QuotaStore};
use crate::infra::pipeline::HttpPipelineGateway;
use crate::infra::postgres::PgQuotaStore;
use crate::infra::webhook::WebhookAlertPublisher;
use crate::presentation::handlers::{self, TriggerAppState};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the trigger router with the production adapters
pub fn trigger_router(
    store: PgQuotaStore,
    pipeline_gw: HttpPipelineGateway,
    alerts: WebhookAlertPublisher,
    config: TriggerConfig,
) -> Router {
    trigger_router_generic(store, pipeline_gw, alerts, config)
}

/// Create a generic trigger router for any adapter implementations
pub fn trigger_router_generic<S, P, N>(
    store: S,
    pipeline_gw: P,
    alerts: N,
    config: TriggerConfig,
) -> Router
where
    S: QuotaStore + Clone + Send + Sync + 'static,
    P: PipelineGateway + Clone + Send + Sync + 'static,
    N: AlertPublisher + Clone + Send + Sync + 'static,
{
    let state = TriggerAppState {
        store: Arc::new(store),
        pipeline_gw: Arc::new(pipeline_gw),
        alerts: Arc::new(alerts),
        config: Arc::new(config),
    };

    Router::new()
        .route("/trigger", post(handlers::request_trigger::<S, P, N>))
        .route("/trigger/quota", get(handlers::quota_status::<S, P, N>))
        .with_state(state)
}
