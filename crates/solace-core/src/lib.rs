//! Conversation logic and port definitions for Solace.
//!
//! This crate defines the conversation session and the "ports" (the
//! `ReplyGenerator` and `SecretProvider` traits) that the infrastructure
//! layer implements. It depends only on `solace-types` -- never on
//! `solace-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
pub mod secret;
