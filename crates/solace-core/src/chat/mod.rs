//! Conversation state for Solace.
//!
//! - `Transcript`: append-only ordered list of turns
//! - `ConversationSession`: transcript plus reply generation with fallbacks
//! - `SessionRegistry`: per-session handles keyed by session id

pub mod prompts;
pub mod registry;
pub mod session;
pub mod transcript;
