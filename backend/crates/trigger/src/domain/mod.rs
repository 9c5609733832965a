//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (UsageRecord)
//! - Domain value objects (CallerIdentity, PipelineRef, QuotaDecision)
//! - Domain events (TriggerEvent)
//! - Domain services (window arithmetic)
//! - Repository traits (interfaces)

pub mod entities;
pub mod events;
pub mod services;
pub mod repository;
pub mod value_objects;
