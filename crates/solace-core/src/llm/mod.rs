//! Reply generator abstractions for Solace.
//!
//! - `ReplyGenerator`: RPITIT trait for concrete backend implementations
//! - `BoxReplyGenerator`: Object-safe wrapper for runtime backend selection

pub mod box_generator;
pub mod generator;
