//! Repository Traits
//!
//! Interfaces for persistence and outbound collaborators. Implementations
//! are in infrastructure layer.

use crate::domain::entities::UsageRecord;
use crate::domain::events::TriggerEvent;
use crate::domain::value_objects::{AdmitOutcome, CallerIdentity, ExecutionId, PipelineRef};
use crate::error::TriggerResult;

/// Quota store trait
#[trait_variant::make(QuotaStore: Send)]
pub trait LocalQuotaStore {
    /// Count records for an identity still live at `as_of_ms`
    async fn count_live(&self, identity: &CallerIdentity, as_of_ms: i64) -> TriggerResult<u32>;

    /// Admit the candidate record iff the identity's live count is under
    /// `limit`, creating it in the same indivisible operation
    async fn admit(
        &self,
        record: &UsageRecord,
        limit: u32,
        as_of_ms: i64,
    ) -> TriggerResult<AdmitOutcome>;

    /// Expiry of the identity's oldest record still live at `as_of_ms`
    async fn oldest_live_expiry(
        &self,
        identity: &CallerIdentity,
        as_of_ms: i64,
    ) -> TriggerResult<Option<i64>>;
}

/// Pipeline gateway trait
#[trait_variant::make(PipelineGateway: Send)]
pub trait LocalPipelineGateway {
    /// Start one execution of the referenced pipeline
    async fn start(&self, pipeline: &PipelineRef) -> TriggerResult<ExecutionId>;
}

/// Alert publisher trait
#[trait_variant::make(AlertPublisher: Send)]
pub trait LocalAlertPublisher {
    /// Deliver one decision event to the alert channel
    async fn publish(&self, event: &TriggerEvent) -> TriggerResult<()>;
}
