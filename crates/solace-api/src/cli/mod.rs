//! CLI command definitions for the `solace` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod canned;
pub mod chat;
pub mod check;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use solace_types::llm::GeneratorKind;

use crate::state::GeneratorOverrides;

/// A supportive chat companion with affirmations and guided meditations.
#[derive(Parser)]
#[command(name = "solace", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans as OpenTelemetry data on stdout.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Reply generator backend (openai, openai_http, gemini, ollama).
    #[arg(long, global = true, env = "SOLACE_BACKEND")]
    pub backend: Option<GeneratorKind>,

    /// Model identifier for the selected backend.
    #[arg(long, global = true, env = "SOLACE_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> GeneratorOverrides {
        GeneratorOverrides {
            backend: self.backend,
            model: self.model.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat,

    /// Print a short positive affirmation.
    Affirm,

    /// Print a short guided meditation.
    Meditate,

    /// Verify the configured backend responds.
    Check,

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to `server.host` in config.toml).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Spinner shown while waiting on the generator.
pub(crate) fn thinking_spinner(message: &str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}
