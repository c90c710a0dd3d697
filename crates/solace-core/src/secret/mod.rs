//! Credential lookup abstractions.
//!
//! - `SecretProvider`: RPITIT trait for a single secret backend
//! - `DynSecretProvider`: shared, object-safe handle to any provider
//! - `SecretService`: resolves a key through an ordered provider chain

pub mod provider;
pub mod service;
