//! Main chat loop.
//!
//! Creates a session in the registry, shows the banner, then reads lines
//! until Ctrl+D or `/exit`. Every non-command line goes through
//! `ConversationSession::send_message`; failures show an inline notice next
//! to the fallback reply.

use console::style;
use tracing::debug;

use solace_core::chat::prompts::INPUT_PLACEHOLDER;
use solace_core::chat::session::Reply;
use solace_core::llm::generator::ReplyGenerator;
use solace_types::chat::{Role, Turn};
use solace_types::error::ChatError;

use crate::cli::canned::print_canned;
use crate::cli::thinking_spinner;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

const ASSISTANT_LABEL: &str = "Solace";

pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let (session_id, handle) = state.sessions.create();
    let generator = state.generator.as_ref();
    debug!(%session_id, "chat session started");

    print_welcome_banner(
        ReplyGenerator::name(generator),
        ReplyGenerator::model(generator),
        &session_id.to_string(),
    );
    println!("  {}", style(INPUT_PLACEHOLDER).italic());
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended. Take care of yourself.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Affirm => {
                    let session = handle.lock().await;
                    let spinner = thinking_spinner("finding the right words...");
                    let canned = session.generate_affirmation().await;
                    spinner.finish_and_clear();
                    print_canned("Affirmation", &canned, false)?;
                }
                ChatCommand::Meditate => {
                    let session = handle.lock().await;
                    let spinner = thinking_spinner("preparing your meditation...");
                    let canned = session.generate_meditation_guide().await;
                    spinner.finish_and_clear();
                    print_canned("Guided meditation", &canned, false)?;
                }
                ChatCommand::Clear => {
                    handle.lock().await.clear();
                    println!("\n  {}\n", style("Conversation cleared.").dim());
                }
                ChatCommand::History => {
                    let session = handle.lock().await;
                    print_history(session.transcript().turns());
                }
                ChatCommand::Exit => {
                    println!("\n  {}", style("Session ended. Take care of yourself.").dim());
                    break;
                }
                ChatCommand::Unknown(name) => {
                    println!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    );
                }
            }
            continue;
        }

        let mut session = handle.lock().await;
        let spinner = thinking_spinner("thinking...");
        let result = session.send_message(&text).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => print_reply(&reply),
            Err(ChatError::EmptyMessage) => continue,
            Err(e) => println!("\n  {} {e}\n", style("!").red().bold()),
        }
    }

    chat_input.flush();
    state.sessions.remove(&session_id);
    Ok(())
}

fn print_reply(reply: &Reply) {
    println!();
    if let Some(failure) = &reply.failure {
        println!("  {} {failure}", style("!").red().bold());
    }
    print_turn(&reply.turn);
    println!();
}

fn print_turn(turn: &Turn) {
    let label = match turn.role() {
        Role::User => style("You").green().bold(),
        Role::Assistant => style(ASSISTANT_LABEL).cyan().bold(),
    };
    let mut lines = turn.content().lines();
    println!("  {label} {}", lines.next().unwrap_or_default());
    for line in lines {
        println!("  {line}");
    }
}

fn print_history(turns: &[Turn]) {
    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for turn in turns {
        print_turn(turn);
    }
    println!();
}
