//! OpenAI chat-completions backend built on the official-style SDK client.
//!
//! Uses [`async_openai`] for typed request/response handling. The base URL
//! is configurable, so any OpenAI-compatible server works here too.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};

use solace_core::llm::generator::ReplyGenerator;
use solace_types::chat::Role;
use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

/// Reply generator backed by `async_openai::Client`.
///
/// Does NOT derive Debug: the client holds the API key.
pub struct OpenAiSdkGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Option<Duration>,
}

impl OpenAiSdkGenerator {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            timeout: None,
        }
    }

    /// Bound each completion call to `secs` seconds.
    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        self.timeout = secs.map(Duration::from_secs);
        self
    }

    fn build_request(&self, request: &GenerationRequest) -> CreateChatCompletionRequest {
        let messages = request
            .input
            .to_turns()
            .iter()
            .map(|turn| match turn.role() {
                Role::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(turn.content().to_string()),
                    name: None,
                }),
                Role::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            turn.content().to_string(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            })
            .collect();

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        let response = self
            .client
            .chat()
            .create(self.build_request(request))
            .await
            .map_err(map_openai_error)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GenerationFailure::new("response contained no message content"))
    }
}

impl ReplyGenerator for OpenAiSdkGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Conversation
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.complete(request))
                .await
                .map_err(|_| GenerationFailure::new(format!("request timed out after {}s", limit.as_secs())))?,
            None => self.complete(request).await,
        }
    }
}

/// Map an `async_openai::error::OpenAIError` to a [`GenerationFailure`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> GenerationFailure {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
            {
                GenerationFailure::new(format!("authentication failed: {}", api_err.message))
            } else if code == "rate_limit_exceeded" || code == "insufficient_quota" {
                GenerationFailure::new(format!("rate limited: {}", api_err.message))
            } else {
                GenerationFailure::new(api_err.message.clone())
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => GenerationFailure::new(format!("authentication failed: {err}")),
            Some(429) => GenerationFailure::new(format!("rate limited: {err}")),
            _ => GenerationFailure::new(format!("HTTP request failed: {err}")),
        },
        OpenAIError::JSONDeserialize(_, content) => {
            GenerationFailure::new(format!("failed to parse response: {content}"))
        }
        _ => GenerationFailure::new(err.to_string()),
    }
}
