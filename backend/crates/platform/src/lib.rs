//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client identification (caller address extraction)
//! - Environment configuration helpers

pub mod client;
pub mod config;
