//! Local Ollama backend (`/api/chat`, non-streaming).

use serde::{Deserialize, Serialize};

use solace_core::llm::generator::ReplyGenerator;
use solace_types::error::SetupError;
use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

use super::http::{build_client, status_failure, transport_failure};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<OllamaMessage>,
    #[serde(default)]
    error: Option<String>,
}

/// Reply generator for a local Ollama server. No API key.
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(base_url: &str, model: &str, timeout_secs: Option<u64>) -> Result<Self, SetupError> {
        Ok(Self {
            client: build_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn to_wire(&self, request: &GenerationRequest) -> ChatRequest<'_> {
        let options = (request.max_tokens.is_some() || request.temperature.is_some()).then(|| Options {
            temperature: request.temperature,
            num_predict: request.max_tokens,
        });

        ChatRequest {
            model: &self.model,
            messages: request
                .input
                .to_turns()
                .iter()
                .map(|turn| OllamaMessage {
                    role: turn.role().to_string(),
                    content: turn.content().to_string(),
                })
                .collect(),
            stream: false,
            options,
        }
    }
}

fn extract_text(response: ChatResponse) -> Result<String, GenerationFailure> {
    if let Some(error) = response.error {
        return Err(GenerationFailure::new(error));
    }
    response
        .message
        .map(|m| m.content)
        .ok_or_else(|| GenerationFailure::new("response contained no message"))
}

impl ReplyGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
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
