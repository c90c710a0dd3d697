//! Secret provider implementations.
//!
//! - `env`: environment variables (highest priority)
//! - `file`: `secrets.toml` in the data directory
//! - `chain`: wires both together in resolution order

pub mod chain;
pub mod env;
pub mod file;
