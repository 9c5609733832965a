//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::UsageRecordId;

use crate::domain::services::window_end_ms;
use crate::domain::value_objects::CallerIdentity;

/// UsageRecord entity - durable evidence of one admitted trigger request
///
/// A record counts toward its caller's quota exactly while
/// `now < expires_at_ms`. Expired rows may linger in storage until the
/// next cleanup pass; counting always filters by expiry and never
/// trusts physical deletion.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub id: UsageRecordId,
    pub identity: CallerIdentity,
    pub created_at: DateTime<Utc>,
    pub expires_at_ms: i64,
}

impl UsageRecord {
    /// Create a new record expiring one quota window after creation
    pub fn new(identity: CallerIdentity, window_ms: i64) -> Self {
        let created_at = Utc::now();
        Self {
            id: UsageRecordId::new(),
            identity,
            created_at,
            expires_at_ms: window_end_ms(created_at.timestamp_millis(), window_ms),
        }
    }

    /// Check whether the record still counts toward the quota at `as_of_ms`
    pub fn is_live(&self, as_of_ms: i64) -> bool {
        as_of_ms < self.expires_at_ms
    }

    /// Check if the record has expired
    pub fn is_expired(&self) -> bool {
        !self.is_live(Utc::now().timestamp_millis())
    }
}
