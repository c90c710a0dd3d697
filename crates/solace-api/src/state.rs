//! Application state wiring configuration, the reply generator and the
//! session registry together.
//!
//! AppState is shared by the CLI commands and the REST API handlers. The
//! generator is pinned to the type-erased [`BoxReplyGenerator`] so the
//! backend can be chosen from configuration at runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use solace_core::chat::prompts::SessionSettings;
use solace_core::chat::registry::SessionRegistry;
use solace_core::chat::session::ConversationSession;
use solace_core::llm::box_generator::BoxReplyGenerator;
use solace_core::secret::service::SecretService;
use solace_infra::config::load_config;
use solace_infra::filesystem::resolve_data_dir;
use solace_infra::llm::create_generator;
use solace_infra::secret::chain::build_secret_chain;
use solace_types::config::AppConfig;
use solace_types::llm::{GeneratorConfig, GeneratorKind};

/// Registry pinned to the runtime-selected generator.
pub type ConcreteRegistry = SessionRegistry<BoxReplyGenerator>;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default, Clone)]
pub struct GeneratorOverrides {
    pub backend: Option<GeneratorKind>,
    pub model: Option<String>,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub generator: Arc<BoxReplyGenerator>,
    pub settings: Arc<SessionSettings>,
    pub sessions: Arc<ConcreteRegistry>,
}

impl AppState {
    /// Load config, resolve the API key through the secret chain and build
    /// the configured generator.
    pub async fn init(overrides: &GeneratorOverrides) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        let mut config = load_config(&data_dir).await;
        apply_overrides(&mut config.generator, overrides);

        let secrets = SecretService::new(build_secret_chain(&data_dir));
        let api_key = match config.generator.api_key_secret() {
            Some(name) => secrets.get_secret(name).await?,
            None => None,
        };

        let generator = create_generator(&config.generator, api_key.as_deref())?;
        tracing::info!(
            kind = %config.generator.kind,
            model = config.generator.model(),
            "generator ready"
        );

        Ok(Self::with_generator(config, data_dir, generator))
    }

    /// Assemble state around an already-built generator.
    pub fn with_generator(config: AppConfig, data_dir: PathBuf, generator: BoxReplyGenerator) -> Self {
        let settings = Arc::new(SessionSettings::from_config(&config));
        let generator = Arc::new(generator);
        let sessions = Arc::new(SessionRegistry::new(generator.clone(), settings.clone()));

        Self {
            config: Arc::new(config),
            data_dir,
            generator,
            settings,
            sessions,
        }
    }

    /// Periodically drop sessions idle longer than `server.session_idle_secs`.
    ///
    /// Returns `None` when idle eviction is disabled.
    pub fn spawn_session_sweeper(&self) -> Option<JoinHandle<()>> {
        let max_idle = match self.config.server.session_idle_secs {
            0 => return None,
            secs => Duration::from_secs(secs),
        };
        let sessions = self.sessions.clone();

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(sweep_period(max_idle));
            loop {
                ticker.tick().await;
                sessions.evict_idle(max_idle);
            }
        }))
    }

    /// A session outside the registry, for one-shot CLI commands.
    pub fn detached_session(&self) -> ConversationSession<BoxReplyGenerator> {
        ConversationSession::new(self.generator.clone(), self.settings.clone())
    }
}

/// How often the sweeper wakes up: every idle window, at most once a minute.
fn sweep_period(max_idle: Duration) -> Duration {
    max_idle.min(Duration::from_secs(60))
}

/// Apply `--backend` / `--model` on top of the file config.
///
/// Switching backend drops the file's model, base URL and key name since
/// they belong to the previous backend; sampling settings are kept.
pub fn apply_overrides(config: &mut GeneratorConfig, overrides: &GeneratorOverrides) {
    if let Some(kind) = overrides.backend {
        if kind != config.kind {
            let mut switched = GeneratorConfig::for_kind(kind);
            switched.max_tokens = config.max_tokens;
            switched.temperature = config.temperature;
            switched.timeout_secs = config.timeout_secs;
            *config = switched;
        }
    }

    if let Some(model) = &overrides.model {
        config.model = Some(model.clone());
    }
}
