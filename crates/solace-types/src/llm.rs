//! Reply generation types for Solace.
//!
//! These types model the data shapes exchanged with a reply generator
//! backend: what gets sent, how the backend is selected and configured, and
//! the single failure mode a generation can end in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::chat::{Turn, user_prompt};

/// How much of the conversation a generator is able to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Accepts the full role-tagged transcript.
    Conversation,
    /// Accepts one flat prompt string.
    SinglePrompt,
}

/// What a generator is asked to continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum GenerationInput {
    /// The ordered transcript, oldest turn first.
    Conversation(Vec<Turn>),
    /// A single prompt string.
    Prompt(String),
}

impl GenerationInput {
    /// Flatten the input into a single prompt string.
    ///
    /// A conversation collapses to its user turns joined by newlines, which
    /// is what single-prompt backends receive.
    pub fn to_prompt(&self) -> String {
        match self {
            GenerationInput::Prompt(prompt) => prompt.clone(),
            GenerationInput::Conversation(turns) => user_prompt(turns),
        }
    }

    /// View the input as role-tagged turns.
    ///
    /// A bare prompt becomes a single user turn.
    pub fn to_turns(&self) -> Vec<Turn> {
        match self {
            GenerationInput::Conversation(turns) => turns.clone(),
            GenerationInput::Prompt(prompt) => vec![Turn::user(prompt.clone())],
        }
    }
}

/// Request to a reply generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub input: GenerationInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl GenerationRequest {
    pub fn new(input: GenerationInput) -> Self {
        Self {
            input,
            max_tokens: None,
            temperature: None,
        }
    }

    /// A stateless request carrying one prompt.
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self::new(GenerationInput::Prompt(prompt.into()))
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// The one way a generation can fail.
///
/// Network errors, authentication errors, rate limits and malformed
/// responses all collapse into this type; `message` keeps the detail for
/// logs and inline notices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("generation failed: {message}")]
pub struct GenerationFailure {
    pub message: String,
}

impl GenerationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Which backend serves reply generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Hosted chat-completion API through its official client.
    #[serde(rename = "openai")]
    OpenAi,
    /// The same hosted API through a plain HTTP client.
    #[serde(rename = "openai_http")]
    OpenAiHttp,
    /// Second hosted provider's generative-model endpoint.
    Gemini,
    /// Locally hosted model runtime.
    Ollama,
}

impl GeneratorKind {
    /// Model used when the configuration does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            GeneratorKind::OpenAi | GeneratorKind::OpenAiHttp => "gpt-3.5-turbo",
            GeneratorKind::Gemini => "gemini-1.5-flash",
            GeneratorKind::Ollama => "llama3",
        }
    }

    /// Endpoint root used when the configuration does not name one.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            GeneratorKind::OpenAi | GeneratorKind::OpenAiHttp => "https://api.openai.com/v1",
            GeneratorKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            GeneratorKind::Ollama => "http://localhost:11434",
        }
    }

    /// Secret name holding the API key, if this backend needs one.
    pub fn default_api_key_secret(&self) -> Option<&'static str> {
        match self {
            GeneratorKind::OpenAi | GeneratorKind::OpenAiHttp => Some("OPENAI_API_KEY"),
            GeneratorKind::Gemini => Some("GEMINI_API_KEY"),
            GeneratorKind::Ollama => None,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        self.default_api_key_secret().is_some()
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorKind::OpenAi => write!(f, "openai"),
            GeneratorKind::OpenAiHttp => write!(f, "openai_http"),
            GeneratorKind::Gemini => write!(f, "gemini"),
            GeneratorKind::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(GeneratorKind::OpenAi),
            "openai_http" | "openai-http" => Ok(GeneratorKind::OpenAiHttp),
            "gemini" => Ok(GeneratorKind::Gemini),
            "ollama" => Ok(GeneratorKind::Ollama),
            other => Err(format!("invalid generator kind: '{other}'")),
        }
    }
}

/// Configuration for the reply generator backend.
///
/// Every field except `kind` is optional; unset fields resolve to the
/// per-kind defaults on [`GeneratorKind`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_kind")]
    pub kind: GeneratorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Name of the secret holding the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// HTTP timeout for one generation, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_kind() -> GeneratorKind {
    GeneratorKind::OpenAi
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_kind(default_kind())
    }
}

impl GeneratorConfig {
    /// A configuration with every optional field unset.
    pub fn for_kind(kind: GeneratorKind) -> Self {
        Self {
            kind,
            model: None,
            base_url: None,
            api_key_secret: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: None,
        }
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.kind.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.kind.default_base_url())
            .trim_end_matches('/')
    }

    /// Name of the secret to resolve for the API key.
    ///
    /// Keyless backends never resolve one, even when `api_key_secret` is set.
    pub fn api_key_secret(&self) -> Option<&str> {
        if !self.kind.requires_api_key() {
            return None;
        }
        self.api_key_secret
            .as_deref()
            .or_else(|| self.kind.default_api_key_secret())
    }
}
