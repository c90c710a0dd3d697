//! Conversation session: one transcript plus reply generation.
//!
//! Every generation error is absorbed here. Callers always get text back,
//! either generated or the fixed fallback for the operation, together with
//! the failure (if any) so the presentation layer can show a notice.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use solace_types::chat::{Role, SessionSnapshot, Turn};
use solace_types::error::ChatError;
use solace_types::llm::{GenerationFailure, GenerationInput, GenerationRequest, InputMode};

use crate::chat::prompts::{
    FALLBACK_AFFIRMATION, FALLBACK_MEDITATION, FALLBACK_REPLY, SessionSettings,
};
use crate::chat::transcript::Transcript;
use crate::llm::generator::ReplyGenerator;

/// Generated text or a fallback, with the failure that caused the fallback.
type Outcome = (String, Option<GenerationFailure>);

/// Result of extending the conversation with an assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// The assistant turn that was appended to the transcript.
    pub turn: Turn,
    /// Set when `turn` holds the fallback reply.
    pub failure: Option<GenerationFailure>,
}

impl Reply {
    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}

/// Result of a stateless canned-prompt generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedText {
    pub text: String,
    /// Set when `text` is the fallback string.
    pub failure: Option<GenerationFailure>,
}

/// Holds one transcript and mediates all reply generation for it.
///
/// Generic over `ReplyGenerator` so tests can plug in a stub and the
/// application can plug in a `BoxReplyGenerator` chosen by configuration.
/// A session is not internally synchronized; share it behind a mutex (see
/// `SessionRegistry`) so concurrent appends cannot interleave.
pub struct ConversationSession<G: ReplyGenerator> {
    id: Uuid,
    transcript: Transcript,
    generator: Arc<G>,
    settings: Arc<SessionSettings>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<G: ReplyGenerator> ConversationSession<G> {
    /// Create an empty session with a fresh id.
    pub fn new(generator: Arc<G>, settings: Arc<SessionSettings>) -> Self {
        Self::with_id(Uuid::now_v7(), generator, settings)
    }

    pub fn with_id(id: Uuid, generator: Arc<G>, settings: Arc<SessionSettings>) -> Self {
        let now = Utc::now();
        Self {
            id,
            transcript: Transcript::new(),
            generator,
            settings,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// When the transcript last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Copy of the transcript for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            turns: self.transcript.turns().to_vec(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Append a user turn.
    ///
    /// Surrounding whitespace is trimmed; a message that is empty after
    /// trimming is rejected and the transcript is left untouched.
    pub fn append_user_message(&mut self, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        self.transcript.push(Turn::user(text));
        self.touch();
        Ok(())
    }

    /// Ask the generator to answer the newest user turn and append its reply.
    ///
    /// Fails with [`ChatError::NoPendingMessage`] unless the transcript ends
    /// with a user turn; the generator is not called in that case. On
    /// generation failure the fallback reply is appended instead, so a
    /// successful call always grows the transcript by one assistant turn.
    pub async fn generate_reply(&mut self) -> Result<Reply, ChatError> {
        if !matches!(self.transcript.last().map(Turn::role), Some(Role::User)) {
            return Err(ChatError::NoPendingMessage);
        }

        let input = match self.generator.input_mode() {
            InputMode::Conversation => {
                GenerationInput::Conversation(self.transcript.turns().to_vec())
            }
            InputMode::SinglePrompt => GenerationInput::Prompt(self.transcript.user_prompt_summary()),
        };

        let (text, failure) = self.run("chat", input, FALLBACK_REPLY).await;
        let turn = Turn::assistant(text);
        self.transcript.push(turn.clone());
        self.touch();

        Ok(Reply { turn, failure })
    }

    /// Append the user's message and generate the reply to it.
    pub async fn send_message(&mut self, text: &str) -> Result<Reply, ChatError> {
        self.append_user_message(text)?;
        self.generate_reply().await
    }

    /// Generate a short affirmation. The transcript is not touched.
    pub async fn generate_affirmation(&self) -> CannedText {
        let prompt = self.settings.affirmation_prompt.clone();
        let (text, failure) = self
            .run("affirmation", GenerationInput::Prompt(prompt), FALLBACK_AFFIRMATION)
            .await;
        CannedText { text, failure }
    }

    /// Generate a guided meditation script. The transcript is not touched.
    pub async fn generate_meditation_guide(&self) -> CannedText {
        let prompt = self.settings.meditation_prompt.clone();
        let (text, failure) = self
            .run("meditation", GenerationInput::Prompt(prompt), FALLBACK_MEDITATION)
            .await;
        CannedText { text, failure }
    }

    /// Empty the transcript. Safe to call on an empty session.
    pub fn clear(&mut self) {
        if !self.transcript.is_empty() {
            self.transcript.clear();
            self.touch();
        }
        debug!(session_id = %self.id, "transcript cleared");
    }

    async fn run(&self, operation: &'static str, input: GenerationInput, fallback: &str) -> Outcome {
        let request = GenerationRequest::new(input)
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        let span = info_span!(
            "generate",
            gen_ai.operation.name = operation,
            gen_ai.provider.name = %self.generator.name(),
            gen_ai.request.model = %self.generator.model(),
            session_id = %self.id,
        );

        let result = self.generator.generate(&request).instrument(span).await;

        match result.map(|text| text.trim().to_string()) {
            Ok(text) if !text.is_empty() => (text, None),
            Ok(_) => {
                let failure = GenerationFailure::new("generator returned an empty reply");
                warn!(session_id = %self.id, operation, error = %failure, "using fallback text");
                (fallback.to_string(), Some(failure))
            }
            Err(failure) => {
                warn!(session_id = %self.id, operation, error = %failure, "using fallback text");
                (fallback.to_string(), Some(failure))
            }
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays scripted results and records every request it sees.
    struct StubGenerator {
        mode: InputMode,
        script: Mutex<VecDeque<Result<String, GenerationFailure>>>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl StubGenerator {
        fn new(mode: InputMode, script: Vec<Result<String, GenerationFailure>>) -> Self {
            Self {
                mode,
                script: Mutex::new(script.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn replying(text: &str) -> Self {
            Self::new(InputMode::Conversation, vec![Ok(text.to_string())])
        }

        fn failing() -> Self {
            Self::new(
                InputMode::Conversation,
                vec![Err(GenerationFailure::new("connection refused"))],
            )
        }

        fn seen(&self) -> Vec<GenerationRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl ReplyGenerator for StubGenerator {
        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        fn input_mode(&self) -> InputMode {
            self.mode
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
            self.seen.lock().unwrap().push(request.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GenerationFailure::new("script exhausted")))
        }
    }

    fn session(generator: StubGenerator) -> ConversationSession<StubGenerator> {
        ConversationSession::new(Arc::new(generator), Arc::new(SessionSettings::default()))
    }

    #[tokio::test]
    async fn test_successful_reply_is_appended() {
        let mut session = session(StubGenerator::replying("Try deep breathing."));

        session.append_user_message("I feel anxious").unwrap();
        let reply = session.generate_reply().await.unwrap();

        assert!(!reply.is_fallback());
        assert_eq!(reply.turn, Turn::assistant("Try deep breathing."));
        assert_eq!(
            session.transcript().turns(),
            &[Turn::user("I feel anxious"), Turn::assistant("Try deep breathing.")]
        );
    }

    #[tokio::test]
    async fn test_failed_reply_appends_fallback() {
        let mut session = session(StubGenerator::failing());

        session.append_user_message("I feel anxious").unwrap();
        let reply = session.generate_reply().await.unwrap();

        assert!(reply.is_fallback());
        assert_eq!(reply.turn.content(), FALLBACK_REPLY);
        assert_eq!(
            reply.turn.content(),
            "I'm having trouble responding right now. Please try again later."
        );
        assert_eq!(
            session.transcript().turns(),
            &[Turn::user("I feel anxious"), Turn::assistant(FALLBACK_REPLY)]
        );
    }

    #[tokio::test]
    async fn test_transcript_grows_by_two_per_exchange() {
        let generator = StubGenerator::new(
            InputMode::Conversation,
            vec![
                Ok("first".to_string()),
                Err(GenerationFailure::new("HTTP 500")),
                Ok("third".to_string()),
                Err(GenerationFailure::new("timeout")),
            ],
        );
        let mut session = session(generator);

        for (i, message) in ["a", "b", "c", "d"].iter().enumerate() {
            let before = session.turn_count();
            session.send_message(message).await.unwrap();
            assert_eq!(session.turn_count(), before + 2);
            assert_eq!(session.turn_count(), (i + 1) * 2);

            // Every exchange ends user -> assistant.
            let turns = session.transcript().turns();
            assert_eq!(turns[turns.len() - 2].role(), Role::User);
            assert_eq!(turns[turns.len() - 1].role(), Role::Assistant);
        }
    }

    #[tokio::test]
    async fn test_conversation_generators_receive_full_transcript() {
        let generator = StubGenerator::new(
            InputMode::Conversation,
            vec![Ok("one".to_string()), Ok("two".to_string())],
        );
        let mut session = session(generator);

        session.send_message("hi").await.unwrap();
        session.send_message("again").await.unwrap();

        let seen = session.generator().seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[1].input,
            GenerationInput::Conversation(vec![
                Turn::user("hi"),
                Turn::assistant("one"),
                Turn::user("again"),
            ])
        );
    }

    #[tokio::test]
    async fn test_single_prompt_generators_receive_user_summary() {
        let generator = StubGenerator::new(
            InputMode::SinglePrompt,
            vec![Ok("one".to_string()), Ok("two".to_string())],
        );
        let mut session = session(generator);

        session.send_message("I can't sleep").await.unwrap();
        session.send_message("My mind races").await.unwrap();

        let seen = session.generator().seen();
        assert_eq!(
            seen[1].input,
            GenerationInput::Prompt("I can't sleep\nMy mind races".to_string())
        );
    }

    #[tokio::test]
    async fn test_reply_text_is_trimmed() {
        let mut session = session(StubGenerator::replying("  \n Breathe in slowly.\n"));
        let reply = session.send_message("help").await.unwrap();
        assert_eq!(reply.turn.content(), "Breathe in slowly.");
    }

    #[tokio::test]
    async fn test_blank_reply_counts_as_failure() {
        let mut session = session(StubGenerator::replying("   "));
        let reply = session.send_message("help").await.unwrap();
        assert!(reply.is_fallback());
        assert_eq!(reply.turn.content(), FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let mut session = session(StubGenerator::replying("unused"));
        assert_eq!(session.append_user_message("   "), Err(ChatError::EmptyMessage));
        assert_eq!(session.send_message("").await, Err(ChatError::EmptyMessage));
        assert!(session.transcript().is_empty());
        assert!(session.generator().seen().is_empty());
    }

    #[tokio::test]
    async fn test_reply_without_user_turn_is_refused() {
        let mut session = session(StubGenerator::new(
            InputMode::SinglePrompt,
            vec![Ok("unused".to_string())],
        ));

        assert_eq!(session.generate_reply().await, Err(ChatError::NoPendingMessage));
        assert!(session.transcript().is_empty());
        assert!(session.generator().seen().is_empty());
    }

    #[tokio::test]
    async fn test_second_reply_to_same_message_is_refused() {
        let generator = StubGenerator::new(
            InputMode::Conversation,
            vec![Ok("first".to_string()), Ok("second".to_string())],
        );
        let mut session = session(generator);

        session.append_user_message("hi").unwrap();
        assert!(session.generate_reply().await.is_ok());
        assert_eq!(session.generate_reply().await, Err(ChatError::NoPendingMessage));

        let roles: Vec<Role> = session.transcript().turns().iter().map(Turn::role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant]);
        assert_eq!(session.generator().seen().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_after_clear_is_refused() {
        let mut session = session(StubGenerator::replying("ok"));
        session.append_user_message("hello").unwrap();
        session.clear();
        assert_eq!(session.generate_reply().await, Err(ChatError::NoPendingMessage));
        assert!(session.generator().seen().is_empty());
    }

    #[tokio::test]
    async fn test_affirmation_does_not_touch_transcript() {
        let generator = StubGenerator::new(
            InputMode::Conversation,
            vec![Ok("reply".to_string()), Ok("You matter.".to_string())],
        );
        let mut session = session(generator);
        session.send_message("hello").await.unwrap();
        let before = session.snapshot().turns;

        let affirmation = session.generate_affirmation().await;

        assert_eq!(affirmation.text, "You matter.");
        assert!(affirmation.failure.is_none());
        assert_eq!(session.snapshot().turns, before);

        let seen = session.generator().seen();
        assert_eq!(
            seen[1].input,
            GenerationInput::Prompt(
                "Give a short positive affirmation to reduce stress.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_affirmation_fallback() {
        let session = session(StubGenerator::failing());
        let affirmation = session.generate_affirmation().await;
        assert_eq!(affirmation.text, "You are stronger than you think.");
        assert!(affirmation.failure.is_some());
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_meditation_guide_success_and_fallback() {
        let generator = StubGenerator::new(
            InputMode::Conversation,
            vec![
                Ok("Sit comfortably and notice your breath.".to_string()),
                Err(GenerationFailure::new("HTTP 401")),
            ],
        );
        let session = session(generator);

        let first = session.generate_meditation_guide().await;
        assert_eq!(first.text, "Sit comfortably and notice your breath.");

        let second = session.generate_meditation_guide().await;
        assert_eq!(second.text, FALLBACK_MEDITATION);
        assert!(session.transcript().is_empty());

        let seen = session.generator().seen();
        assert_eq!(
            seen[0].input,
            GenerationInput::Prompt("Write a 3-minute guided meditation for relaxation.".to_string())
        );
    }

    #[tokio::test]
    async fn test_settings_flow_into_requests() {
        let settings = SessionSettings {
            affirmation_prompt: "Give a short, positive affirmation for stress relief.".to_string(),
            max_tokens: Some(128),
            temperature: Some(0.3),
            ..SessionSettings::default()
        };
        let session = ConversationSession::new(
            Arc::new(StubGenerator::replying("ok")),
            Arc::new(settings),
        );

        session.generate_affirmation().await;

        let seen = session.generator().seen();
        assert_eq!(seen[0].max_tokens, Some(128));
        assert_eq!(seen[0].temperature, Some(0.3));
        assert_eq!(
            seen[0].input,
            GenerationInput::Prompt("Give a short, positive affirmation for stress relief.".to_string())
        );
    }

    #[tokio::test]
    async fn test_clear_empties_and_is_idempotent() {
        let mut session = session(StubGenerator::replying("ok"));
        session.send_message("hello").await.unwrap();
        assert_eq!(session.turn_count(), 2);

        session.clear();
        assert!(session.transcript().is_empty());
        session.clear();
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_snapshot_carries_id() {
        let id = Uuid::now_v7();
        let session = ConversationSession::with_id(
            id,
            Arc::new(StubGenerator::replying("ok")),
            Arc::new(SessionSettings::default()),
        );
        let snapshot = session.snapshot();
        assert_eq!(snapshot.id, id);
        assert!(snapshot.turns.is_empty());
    }
}
