//! Session registry for serving many users from one process.
//!
//! Each session lives behind its own `tokio::sync::Mutex`. A request handler
//! holds the lock for the whole append-then-generate sequence, which keeps
//! user/assistant turns paired even when requests for one session overlap.
//! Different sessions never contend with each other.
//!
//! Sessions leave the registry through an explicit [`SessionRegistry::remove`]
//! or through [`SessionRegistry::evict_idle`], which a long-running server
//! calls periodically so abandoned sessions do not accumulate.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use solace_types::error::ChatError;

use crate::chat::prompts::SessionSettings;
use crate::chat::session::ConversationSession;
use crate::llm::generator::ReplyGenerator;

/// Shared, lockable handle to one session.
pub type SessionHandle<G> = Arc<Mutex<ConversationSession<G>>>;

/// Live sessions indexed by id.
///
/// All sessions share one generator and one set of settings. Sessions are
/// kept in memory only and disappear with the process.
pub struct SessionRegistry<G: ReplyGenerator> {
    sessions: DashMap<Uuid, SessionHandle<G>>,
    generator: Arc<G>,
    settings: Arc<SessionSettings>,
}

impl<G: ReplyGenerator> SessionRegistry<G> {
    pub fn new(generator: Arc<G>, settings: Arc<SessionSettings>) -> Self {
        Self {
            sessions: DashMap::new(),
            generator,
            settings,
        }
    }

    /// Start a new empty session and return its id and handle.
    pub fn create(&self) -> (Uuid, SessionHandle<G>) {
        let session = ConversationSession::new(self.generator.clone(), self.settings.clone());
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(id, handle.clone());
        info!(session_id = %id, active = self.sessions.len(), "session created");
        (id, handle)
    }

    /// Look up a session by id.
    pub fn get(&self, id: &Uuid) -> Result<SessionHandle<G>, ChatError> {
        self.sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(ChatError::SessionNotFound(*id))
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!(session_id = %id, "session removed");
        }
        removed
    }

    /// Drop every session whose transcript has not changed for `max_idle`.
    ///
    /// Sessions that are locked by an in-flight request are skipped. Returns
    /// the number of sessions removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();

        self.sessions.retain(|id, handle| {
            let Ok(session) = handle.try_lock() else {
                return true;
            };
            let idle = now.signed_duration_since(session.updated_at()).to_std();
            let expired = idle.is_ok_and(|idle| idle >= max_idle);
            if expired {
                debug!(session_id = %id, "evicting idle session");
            }
            !expired
        });

        let evicted = before.saturating_sub(self.sessions.len());
        if evicted > 0 {
            info!(evicted, active = self.sessions.len(), "idle sessions evicted");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solace_types::chat::Role;
    use solace_types::llm::{GenerationFailure, GenerationRequest, InputMode};

    /// Echoes the newest user turn after yielding, so overlapping requests
    /// get a chance to interleave.
    struct YieldingEcho;

    impl ReplyGenerator for YieldingEcho {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        fn input_mode(&self) -> InputMode {
            InputMode::Conversation
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationFailure> {
            tokio::task::yield_now().await;
            let turns = request.input.to_turns();
            let last = turns.last().map(|t| t.content().to_string()).unwrap_or_default();
            Ok(format!("echo: {last}"))
        }
    }

    fn registry() -> SessionRegistry<YieldingEcho> {
        SessionRegistry::new(Arc::new(YieldingEcho), Arc::new(SessionSettings::default()))
    }

    #[test]
    fn test_create_get_remove() {
        let registry = registry();
        let (id, _) = registry.create();

        assert_eq!(registry.len(), 1);
        assert!(registry.get(&id).is_ok());
        assert_eq!(registry.ids(), vec![id]);

        assert!(registry.remove(&id));
        assert!(!registry.remove(&id));
        assert!(registry.is_empty());
        assert_eq!(registry.get(&id).err(), Some(ChatError::SessionNotFound(id)));
    }

    #[tokio::test]
    async fn test_evict_idle_removes_untouched_sessions() {
        let registry = registry();
        let (a, _) = registry.create();
        let (b, _) = registry.create();

        assert_eq!(registry.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.evict_idle(Duration::ZERO), 2);
        assert!(registry.is_empty());
        assert_eq!(registry.get(&a).err(), Some(ChatError::SessionNotFound(a)));
        assert_eq!(registry.get(&b).err(), Some(ChatError::SessionNotFound(b)));
    }

    #[tokio::test]
    async fn test_evict_idle_skips_busy_sessions() {
        let registry = registry();
        let (busy, handle) = registry.create();
        let (idle, _) = registry.create();

        let guard = handle.lock().await;
        assert_eq!(registry.evict_idle(Duration::ZERO), 1);
        assert!(registry.get(&busy).is_ok());
        assert!(registry.get(&idle).is_err());

        drop(guard);
        assert_eq!(registry.evict_idle(Duration::ZERO), 1);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let registry = registry();
        let (a, _) = registry.create();
        let (b, _) = registry.create();

        registry
            .get(&a)
            .unwrap()
            .lock()
            .await
            .send_message("hello")
            .await
            .unwrap();

        assert_eq!(registry.get(&a).unwrap().lock().await.turn_count(), 2);
        assert_eq!(registry.get(&b).unwrap().lock().await.turn_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sends_keep_turns_paired() {
        let registry = Arc::new(registry());
        let (id, _) = registry.create();

        let mut tasks = Vec::new();
        for i in 0..16 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                let handle = registry.get(&id).unwrap();
                let mut session = handle.lock().await;
                session.send_message(&format!("message {i}")).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let handle = registry.get(&id).unwrap();
        let session = handle.lock().await;
        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 32);

        for pair in turns.chunks(2) {
            assert_eq!(pair[0].role(), Role::User);
            assert_eq!(pair[1].role(), Role::Assistant);
            assert_eq!(pair[1].content(), format!("echo: {}", pair[0].content()));
        }
    }
}
