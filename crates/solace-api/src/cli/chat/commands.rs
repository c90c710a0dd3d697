//! Slash commands for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    /// Ask for a fresh affirmation.
    Affirm,
    /// Ask for a guided meditation.
    Meditate,
    /// Reset the transcript.
    Clear,
    /// Show the transcript so far.
    History,
    Exit,
    Unknown(String),
}

/// Parse user input as a slash command. `None` when it doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/affirm" | "/affirmation" => Some(ChatCommand::Affirm),
        "/meditate" | "/meditation" => Some(ChatCommand::Meditate),
        "/clear" | "/reset" => Some(ChatCommand::Clear),
        "/history" => Some(ChatCommand::History),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}     {}", style("/help").cyan(), "Show this help message");
    println!("  {}   {}", style("/affirm").cyan(), "Get a short positive affirmation");
    println!("  {} {}", style("/meditate").cyan(), "Get a 3-minute guided meditation");
    println!("  {}    {}", style("/clear").cyan(), "Start the conversation over");
    println!("  {}  {}", style("/history").cyan(), "Show the conversation so far");
    println!("  {}     {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_canned_commands() {
        assert_eq!(parse("/affirm"), Some(ChatCommand::Affirm));
        assert_eq!(parse("/AFFIRMATION"), Some(ChatCommand::Affirm));
        assert_eq!(parse("/meditate please"), Some(ChatCommand::Meditate));
    }

    #[test]
    fn test_parse_clear_and_exit() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("/reset"), Some(ChatCommand::Clear));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("I feel stressed about /work"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/dance"), Some(ChatCommand::Unknown("/dance".to_string())));
    }
}
