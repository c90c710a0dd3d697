//! Scripted generator and state builder for handler tests.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

use solace_core::llm::box_generator::BoxReplyGenerator;
use solace_core::llm::generator::ReplyGenerator;
use solace_types::config::AppConfig;
use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

use crate::state::AppState;

/// Pops scripted results in order; replies "I'm here for you." once empty.
pub(crate) struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationFailure>>>,
}

impl ReplyGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Conversation
    }

    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationFailure> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("I'm here for you.".to_string()))
    }
}

pub(crate) fn state_with(script: Vec<Result<String, GenerationFailure>>) -> AppState {
    state_with_config(AppConfig::default(), script)
}

pub(crate) fn state_with_config(
    config: AppConfig,
    script: Vec<Result<String, GenerationFailure>>,
) -> AppState {
    let generator = ScriptedGenerator {
        script: Mutex::new(script.into()),
    };
    AppState::with_generator(config, PathBuf::from(".solace-test"), BoxReplyGenerator::new(generator))
}
