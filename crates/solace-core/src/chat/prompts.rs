//! Canned prompts and the fixed fallback strings.
//!
//! Fallbacks are substituted for generated text whenever a generation
//! fails. They are deliberately not configurable.

use solace_types::config::{AppConfig, PromptConfig};

/// Substituted for a conversational reply when generation fails.
pub const FALLBACK_REPLY: &str = "I'm having trouble responding right now. Please try again later.";

/// Substituted for an affirmation when generation fails.
pub const FALLBACK_AFFIRMATION: &str = "You are stronger than you think.";

/// Substituted for a meditation guide when generation fails.
pub const FALLBACK_MEDITATION: &str = "Close your eyes. Take a deep breath... and relax.";

/// Title shown by every presentation surface.
pub const APP_TITLE: &str = "Mental Health Support Chatbot";

/// Placeholder shown where the user types a message.
pub const INPUT_PLACEHOLDER: &str = "How can I help you today?";

/// Shown alongside every chat surface.
pub const DISCLAIMER: &str = "This chatbot is not a substitute for professional mental health care. \
If you're in crisis, please contact your local emergency services or a mental health professional.";

/// Per-session generation settings shared by every session of a process.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub affirmation_prompt: String,
    pub meditation_prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            affirmation_prompt: config.prompts.affirmation.clone(),
            meditation_prompt: config.prompts.meditation.clone(),
            max_tokens: config.generator.max_tokens,
            temperature: config.generator.temperature,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        let prompts = PromptConfig::default();
        Self {
            affirmation_prompt: prompts.affirmation,
            meditation_prompt: prompts.meditation,
            max_tokens: None,
            temperature: None,
        }
    }
}
