//! Evaluate Quota Use Case

use crate::application::config::TriggerConfig;
use crate::domain::entities::UsageRecord;
use crate::domain::repository::QuotaStore;
use crate::domain::value_objects::{CallerIdentity, QuotaDecision};
use crate::error::TriggerResult;
use std::sync::Arc;

/// Evaluate Quota Use Case
///
/// The single admission authority: builds the candidate usage record for
/// the identity and delegates the count-and-create to the store's atomic
/// primitive. Concurrent evaluations for the same identity therefore
/// never over-admit, whichever order they land in.
pub struct EvaluateQuotaUseCase<S>
where
    S: QuotaStore,
{
    store: Arc<S>,
    config: Arc<TriggerConfig>,
}

impl<S> EvaluateQuotaUseCase<S>
where
    S: QuotaStore,
{
    pub fn new(store: Arc<S>, config: Arc<TriggerConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, identity: &CallerIdentity) -> TriggerResult<QuotaDecision> {
        let record = UsageRecord::new(identity.clone(), self.config.quota_window_ms());
        let as_of_ms = record.created_at.timestamp_millis();

        let outcome = self
            .store
            .admit(&record, self.config.quota_limit, as_of_ms)
            .await?;

        let decision = QuotaDecision {
            identity: identity.clone(),
            admitted: outcome.admitted,
            live_count: outcome.live_count,
            limit: self.config.quota_limit,
            window_resets_at_ms: outcome.window_resets_at_ms,
        };

        if decision.admitted {
            tracing::info!(
                identity = %decision.identity,
                record_id = %record.id,
                live_count = decision.live_count,
                limit = decision.limit,
                "Trigger admitted"
            );
        } else {
            tracing::warn!(
                identity = %decision.identity,
                live_count = decision.live_count,
                limit = decision.limit,
                resets_at_ms = decision.window_resets_at_ms,
                "Trigger denied, quota window full"
            );
        }

        Ok(decision)
    }
}
