use thiserror::Error;
use uuid::Uuid;

use crate::llm::GeneratorKind;

/// Errors from conversation session operations.
///
/// Generation failures are absent on purpose: they are absorbed by the
/// session and replaced with fallback text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("no user message is waiting for a reply")]
    NoPendingMessage,

    #[error("session {0} not found")]
    SessionNotFound(Uuid),
}

/// Errors raised while constructing a reply generator.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no API key available for the '{kind}' generator (expected secret '{secret}')")]
    MissingApiKey { kind: GeneratorKind, secret: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Errors from secret lookup.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secret '{0}' not found")]
    NotFound(String),

    #[error("secret storage error: {0}")]
    Storage(String),
}
