//! Infrastructure Layer
//!
//! Adapters for the quota store, the pipeline server, and the alert
//! channel.

pub mod pipeline;
pub mod postgres;
pub mod webhook;
