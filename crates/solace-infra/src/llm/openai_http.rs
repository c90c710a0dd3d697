//! OpenAI chat-completions backend over plain HTTP.
//!
//! Talks to `{base_url}/chat/completions` with reqwest and hand-written wire
//! types instead of the SDK. Useful for self-hosted gateways that speak the
//! OpenAI protocol loosely.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use solace_core::llm::generator::ReplyGenerator;
use solace_types::error::SetupError;
use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

use super::http::{build_client, status_failure, transport_failure};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

/// Reply generator that posts raw JSON to an OpenAI-compatible endpoint.
///
/// The API key is held as a [`SecretString`] and only exposed when building
/// the `Authorization` header. No Debug derive.
pub struct OpenAiHttpGenerator {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiHttpGenerator {
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        model: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, SetupError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn to_wire(&self, request: &GenerationRequest) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: request
                .input
                .to_turns()
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role().to_string(),
                    content: Some(turn.content().to_string()),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

fn extract_text(response: ChatResponse) -> Result<String, GenerationFailure> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GenerationFailure::new("response contained no message content"))
}

impl ReplyGenerator for OpenAiHttpGenerator {
    fn name(&self) -> &str {
        "openai_http"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Conversation
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.to_wire(request))
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_failure(status, &body));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationFailure::new(format!("failed to parse response: {e}")))?;
        extract_text(parsed)
    }
}
