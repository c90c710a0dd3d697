//! Shared domain types for Solace.
//!
//! This crate contains the domain types used across the Solace workspace:
//! conversation turns, generation requests, generator configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
