//! Welcome banner shown when a chat session starts.

use console::style;

use solace_core::chat::prompts::{APP_TITLE, DISCLAIMER};

/// Print the title, disclaimer and backend details.
pub fn print_welcome_banner(backend: &str, model: &str, session_id: &str) {
    println!();
    println!("  {}", style(APP_TITLE).cyan().bold());
    println!();
    for line in wrap(DISCLAIMER, 72) {
        println!("  {}", style(line).dim());
    }
    println!();
    println!("  {}  {} ({})", style("Backend:").bold(), backend, style(model).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /affirm or /meditate for a moment of calm, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("one two three four five six", 9);
        assert_eq!(lines, vec!["one two", "three", "four five", "six"]);
    }

    #[test]
    fn test_wrap_keeps_long_word_whole() {
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }
}
