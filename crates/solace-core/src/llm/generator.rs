//! ReplyGenerator trait definition.
//!
//! This is the single seam between the conversation session and whichever
//! model backend is configured.

use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

/// Trait for reply generator backends (hosted chat APIs, local runtimes).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). There is
/// exactly one operation, [`generate`](ReplyGenerator::generate), and one
/// failure mode, [`GenerationFailure`]. The remaining methods describe the
/// backend.
///
/// Implementations live in solace-infra (e.g., `OllamaGenerator`).
pub trait ReplyGenerator: Send + Sync {
    /// Short backend name (e.g., "openai", "ollama").
    fn name(&self) -> &str;

    /// Model identifier this generator sends requests to.
    fn model(&self) -> &str;

    /// Whether the backend takes the whole transcript or one prompt string.
    fn input_mode(&self) -> InputMode;

    /// Produce reply text for the request.
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, GenerationFailure>> + Send;
}
