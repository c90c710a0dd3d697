//! Infrastructure layer for Solace.
//!
//! Contains implementations of the ports defined in `solace-core`: the four
//! reply generator backends, secret providers, plus the config file loader
//! and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
