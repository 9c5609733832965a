//! PostgreSQL Quota Store Implementation

use crate::domain::entities::UsageRecord;
use crate::domain::repository::QuotaStore;
use crate::domain::value_objects::{AdmitOutcome, CallerIdentity};
use crate::error::TriggerResult;
use chrono::Utc;
use sqlx::PgPool;

/// PostgreSQL-backed quota store
///
/// Admissions for one identity are serialized with a transaction-scoped
/// advisory lock keyed on the identity, which makes the count-and-create
/// a single indivisible operation for concurrent callers. Read-only
/// paths never take the lock, so status queries and other identities do
/// not contend. If the connection drops before commit the transaction
/// rolls back and no record exists, so a store failure always leaves
/// the request safe to retry.
#[derive(Clone)]
pub struct PgQuotaStore {
    pool: PgPool,
}

impl PgQuotaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired usage records
    ///
    /// Counting never depends on this having run; it only keeps the
    /// table from growing without bound.
    pub async fn cleanup_expired(&self) -> TriggerResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let records_deleted =
            sqlx::query("DELETE FROM trigger_usage_records WHERE expires_at_ms <= $1")
                .bind(now_ms)
                .execute(&self.pool)
                .await?
                .rows_affected();

        tracing::info!(records = records_deleted, "Cleaned up expired usage records");

        Ok(records_deleted)
    }
}

impl QuotaStore for PgQuotaStore {
    async fn count_live(&self, identity: &CallerIdentity, as_of_ms: i64) -> TriggerResult<u32> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT count(*)
            FROM trigger_usage_records
            WHERE caller_identity = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(identity.as_str())
        .bind(as_of_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(count as u32)
    }

    async fn admit(
        &self,
        record: &UsageRecord,
        limit: u32,
        as_of_ms: i64,
    ) -> TriggerResult<AdmitOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serialize same-identity admissions. The lock must be taken in
        // its own statement: under READ COMMITTED each statement snapshots
        // independently, so the count below sees every admission committed
        // while we waited. Hash collisions between identities only cost
        // contention, never correctness.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1)::bigint)")
            .bind(record.identity.as_str())
            .execute(&mut *tx)
            .await?;

        let (live_count, oldest_expiry) = sqlx::query_as::<_, (i64, Option<i64>)>(
            r#"
            SELECT count(*), min(expires_at_ms)
            FROM trigger_usage_records
            WHERE caller_identity = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(record.identity.as_str())
        .bind(as_of_ms)
        .fetch_one(&mut *tx)
        .await?;

        if live_count as u32 >= limit {
            // Nothing written; commit just releases the lock
            tx.commit().await?;

            tracing::warn!(
                identity = %record.identity,
                live_count = live_count,
                limit = limit,
                "Admission denied, quota window full"
            );

            return Ok(AdmitOutcome {
                admitted: false,
                live_count: live_count as u32,
                // Denial implies at least one live row; the candidate's own
                // expiry only stands in if the store says otherwise
                window_resets_at_ms: oldest_expiry.unwrap_or(record.expires_at_ms),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO trigger_usage_records (
                trigger_usage_record_id,
                caller_identity,
                created_at,
                expires_at_ms
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.into_uuid())
        .bind(record.identity.as_str())
        .bind(record.created_at)
        .bind(record.expires_at_ms)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let live_count = live_count as u32 + 1;

        tracing::info!(
            record_id = %record.id,
            identity = %record.identity,
            live_count = live_count,
            "Usage record created"
        );

        Ok(AdmitOutcome {
            admitted: true,
            live_count,
            window_resets_at_ms: record.expires_at_ms,
        })
    }

    async fn oldest_live_expiry(
        &self,
        identity: &CallerIdentity,
        as_of_ms: i64,
    ) -> TriggerResult<Option<i64>> {
        let expiry = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT min(expires_at_ms)
            FROM trigger_usage_records
            WHERE caller_identity = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(identity.as_str())
        .bind(as_of_ms)
        .fetch_one(&self.pool)
        .await?;

        Ok(expiry)
    }
}
