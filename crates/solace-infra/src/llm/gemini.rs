//! Google Gemini backend (`models/{model}:generateContent`).
//!
//! Gemini is driven in single-prompt mode: the session flattens the
//! transcript's user turns into one prompt before calling it.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use solace_core::llm::generator::ReplyGenerator;
use solace_types::error::SetupError;
use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

use super::http::{build_client, status_failure, transport_failure};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Reply generator for the Gemini REST API.
///
/// The key is sent in the `x-goog-api-key` header rather than the query
/// string so it never shows up in logged URLs.
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiGenerator {
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
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn to_wire(request: &GenerationRequest) -> GenerateContentRequest {
        let generation_config = (request.max_tokens.is_some() || request.temperature.is_some())
            .then(|| GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.input.to_prompt()),
                }],
            }],
            generation_config,
        }
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationFailure> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationFailure::new(format!("prompt blocked: {reason}")));
    }

    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() {
        return Err(GenerationFailure::new("response contained no candidate text"));
    }
    Ok(text)
}

impl ReplyGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn input_mode(&self) -> InputMode {
        InputMode::SinglePrompt
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&Self::to_wire(request))
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_failure(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationFailure::new(format!("failed to parse response: {e}")))?;
        extract_text(parsed)
    }
}
