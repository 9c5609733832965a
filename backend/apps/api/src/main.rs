//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use platform::config::{env_opt, env_or, parse_env_or, require_env};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trigger::domain::value_objects::PipelineRef;
use trigger::{
    HttpPipelineGateway, NullAlertPublisher, PgQuotaStore, TriggerConfig, WebhookAlertPublisher,
    trigger_router, trigger_router_generic,
};

/// How often the background sweep deletes expired usage records.
/// Counting never depends on the sweep; it only bounds table growth.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,trigger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = require_env("DATABASE_URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let store = PgQuotaStore::new(pool.clone());

    // Startup cleanup: remove expired usage records
    // Errors here should not prevent server startup
    match store.cleanup_expired().await {
        Ok(records) => {
            tracing::info!(records_deleted = records, "Usage record cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Usage record cleanup failed, continuing anyway");
        }
    }

    // Periodic sweep so a rarely-restarted server still sheds dead rows
    let sweep_store = store.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
        ticker.tick().await; // first tick fires immediately, startup already swept
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_store.cleanup_expired().await {
                tracing::warn!(error = %e, "Periodic usage record cleanup failed");
            }
        }
    });

    // Trigger configuration
    let pipeline = PipelineRef::new(require_env("PIPELINE_NAME")?)?;
    let trigger_config = TriggerConfig {
        quota_limit: parse_env_or("TRIGGER_QUOTA_LIMIT", 3u32),
        quota_window: Duration::from_secs(
            parse_env_or("TRIGGER_QUOTA_WINDOW_DAYS", 7u64) * 24 * 60 * 60,
        ),
        ..TriggerConfig::for_pipeline(pipeline)
    };

    // Downstream pipeline gateway
    let pipeline_base_url = require_env("PIPELINE_BASE_URL")?;
    let pipeline_client = reqwest::Client::builder()
        .timeout(trigger_config.pipeline_timeout)
        .build()?;
    let pipeline_gw = HttpPipelineGateway::new(
        pipeline_client,
        pipeline_base_url,
        env_opt("PIPELINE_TOKEN"),
    );

    // Alert channel is optional; without it events are logged and dropped
    let trigger_routes = match env_opt("ALERT_WEBHOOK_URL") {
        Some(webhook_url) => {
            let alert_client = reqwest::Client::builder()
                .timeout(trigger_config.alert_timeout)
                .build()?;
            let alerts = WebhookAlertPublisher::new(
                alert_client,
                webhook_url,
                trigger_config.pipeline.as_str(),
            );
            trigger_router(store, pipeline_gw, alerts, trigger_config)
        }
        None => {
            tracing::warn!("ALERT_WEBHOOK_URL not set, alert delivery disabled");
            trigger_router_generic(store, pipeline_gw, NullAlertPublisher, trigger_config)
        }
    };

    // CORS configuration
    let frontend_origins = env_or(
        "FRONTEND_ORIGINS",
        "http://localhost:40922,http://127.0.0.1:40922",
    );

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .nest("/api", trigger_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env_or("BIND_ADDR", "0.0.0.0:31113").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
