//! Reply generator backends.
//!
//! Four implementations of the [`ReplyGenerator`] port from `solace-core`:
//! the OpenAI SDK client, a raw-HTTP OpenAI-compatible client, Google
//! Gemini and a local Ollama server.
//!
//! [`create_generator`] picks one from a [`GeneratorConfig`] and
//! [`check_connection`] sends a tiny request to verify it responds.

pub mod gemini;
mod http;
pub mod ollama;
pub mod openai_http;
pub mod openai_sdk;

use secrecy::SecretString;

use solace_core::llm::box_generator::BoxReplyGenerator;
use solace_core::llm::generator::ReplyGenerator;
use solace_types::error::SetupError;
use solace_types::llm::{GenerationFailure, GenerationRequest, GeneratorConfig, GeneratorKind};

use self::gemini::GeminiGenerator;
use self::ollama::OllamaGenerator;
use self::openai_http::OpenAiHttpGenerator;
use self::openai_sdk::OpenAiSdkGenerator;

/// Create a [`BoxReplyGenerator`] from a [`GeneratorConfig`].
///
/// `api_key` is the already-resolved secret value. Keyed backends fail with
/// [`SetupError::MissingApiKey`] when it is absent or blank.
pub fn create_generator(
    config: &GeneratorConfig,
    api_key: Option<&str>,
) -> Result<BoxReplyGenerator, SetupError> {
    let model = config.model();
    let base_url = config.base_url();

    let generator = match config.kind {
        GeneratorKind::OpenAi => {
            let key = require_key(config, api_key)?;
            let generator = OpenAiSdkGenerator::new(key, base_url, model).with_timeout(config.timeout_secs);
            BoxReplyGenerator::new(generator)
        }
        GeneratorKind::OpenAiHttp => {
            let key = SecretString::from(require_key(config, api_key)?.to_string());
            BoxReplyGenerator::new(OpenAiHttpGenerator::new(key, base_url, model, config.timeout_secs)?)
        }
        GeneratorKind::Gemini => {
            let key = SecretString::from(require_key(config, api_key)?.to_string());
            BoxReplyGenerator::new(GeminiGenerator::new(key, base_url, model, config.timeout_secs)?)
        }
        GeneratorKind::Ollama => {
            BoxReplyGenerator::new(OllamaGenerator::new(base_url, model, config.timeout_secs)?)
        }
    };

    tracing::debug!(kind = %config.kind, model, base_url, "reply generator created");
    Ok(generator)
}

fn require_key<'a>(config: &GeneratorConfig, api_key: Option<&'a str>) -> Result<&'a str, SetupError> {
    match api_key.map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(SetupError::MissingApiKey {
            kind: config.kind,
            secret: config.api_key_secret().unwrap_or_default().to_string(),
        }),
    }
}

/// Verify a generator responds by sending a one-word prompt with a tiny
/// token budget.
pub async fn check_connection(generator: &BoxReplyGenerator) -> Result<String, GenerationFailure> {
    let request = GenerationRequest::prompt("Hello")
        .with_max_tokens(Some(10))
        .with_temperature(Some(0.0));
    ReplyGenerator::generate(generator, &request).await
}
