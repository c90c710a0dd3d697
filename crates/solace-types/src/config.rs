//! Application configuration types for Solace.
//!
//! `AppConfig` represents the top-level `config.toml` that selects the reply
//! generator backend, the wording of the canned prompts, and the HTTP bind
//! address. All fields have sensible defaults.

use serde::{Deserialize, Serialize};

use crate::llm::GeneratorConfig;

/// Default prompt for the affirmation feature.
pub const DEFAULT_AFFIRMATION_PROMPT: &str = "Give a short positive affirmation to reduce stress.";

/// Default prompt for the guided meditation feature.
pub const DEFAULT_MEDITATION_PROMPT: &str = "Write a 3-minute guided meditation for relaxation.";

/// Top-level configuration, loaded from `~/.solace/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub prompts: PromptConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Wording of the two canned, stateless prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_affirmation")]
    pub affirmation: String,

    #[serde(default = "default_meditation")]
    pub meditation: String,
}

fn default_affirmation() -> String {
    DEFAULT_AFFIRMATION_PROMPT.to_string()
}

fn default_meditation() -> String {
    DEFAULT_MEDITATION_PROMPT.to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            affirmation: default_affirmation(),
            meditation: default_meditation(),
        }
    }
}

/// Settings for `solace serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds without activity after which a session is dropped.
    /// 0 keeps sessions until they are deleted.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GeneratorKind;

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.generator.kind, GeneratorKind::OpenAi);
        assert_eq!(config.generator.model(), "gpt-3.5-turbo");
        assert_eq!(config.prompts.affirmation, DEFAULT_AFFIRMATION_PROMPT);
        assert_eq!(config.prompts.meditation, DEFAULT_MEDITATION_PROMPT);
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.server.session_idle_secs, 3600);
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
[generator]
kind = "gemini"
model = "gemini-1.5-pro"
temperature = 0.4

[prompts]
affirmation = "Give a short, positive affirmation for stress relief."

[server]
host = "0.0.0.0"
port = 9000
session_idle_secs = 0
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.kind, GeneratorKind::Gemini);
        assert_eq!(config.generator.model(), "gemini-1.5-pro");
        assert_eq!(config.generator.temperature, Some(0.4));
        assert_eq!(
            config.prompts.affirmation,
            "Give a short, positive affirmation for stress relief."
        );
        // Unset prompt keeps its default
        assert_eq!(config.prompts.meditation, DEFAULT_MEDITATION_PROMPT);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.session_idle_secs, 0);
    }

    #[test]
    fn test_unknown_generator_kind_is_rejected() {
        let toml_str = r#"
[generator]
kind = "carrier-pigeon"
"#;
        assert!(toml::from_str::<AppConfig>(toml_str).is_err());
    }
}
