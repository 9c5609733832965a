//! Application Configuration
//!
//! Configuration for the trigger application layer.

use std::time::Duration;

use crate::domain::value_objects::PipelineRef;

/// Trigger application configuration
#[derive(Debug, Clone)]
pub struct TriggerConfig {
    /// Max admitted triggers per identity per window
    pub quota_limit: u32,
    /// Rolling quota window
    pub quota_window: Duration,
    /// Downstream pipeline to start on admission
    pub pipeline: PipelineRef,
    /// Start-execution call timeout
    pub pipeline_timeout: Duration,
    /// Alert webhook delivery timeout
    pub alert_timeout: Duration,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            quota_limit: 3,
            quota_window: Duration::from_secs(7 * 24 * 60 * 60),
            pipeline: PipelineRef::default(),
            pipeline_timeout: Duration::from_secs(10),
            alert_timeout: Duration::from_secs(5),
        }
    }
}

impl TriggerConfig {
    /// Create config for a named pipeline, defaults elsewhere
    pub fn for_pipeline(pipeline: PipelineRef) -> Self {
        Self {
            pipeline,
            ..Default::default()
        }
    }

    pub fn quota_window_ms(&self) -> i64 {
        self.quota_window.as_millis() as i64
    }
}
