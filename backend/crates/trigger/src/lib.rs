//! Trigger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, port traits
//! - `application/` - Use cases
//! - `infra/` - Store, pipeline, and alert adapters
//! - `presentation/` - HTTP handlers
//!
//! ## Admission Model
//! - The quota store is the sole authority for admit/deny; the check and
//!   the record creation are one atomic operation
//! - Counting always filters by record expiry and never trusts physical
//!   cleanup having run
//! - A consumed quota unit is never refunded, even when the downstream
//!   pipeline call fails
//! - Every finalized decision produces exactly one alert event; alert
//!   delivery failures never change the decision

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::TriggerConfig;
pub use application::request_trigger::{TriggerOutcome, TriggerRequestInput};
pub use error::{TriggerError, TriggerResult};
pub use infra::pipeline::HttpPipelineGateway;
pub use infra::postgres::PgQuotaStore;
pub use infra::webhook::{NullAlertPublisher, WebhookAlertPublisher};
pub use presentation::router::{trigger_router, trigger_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};
