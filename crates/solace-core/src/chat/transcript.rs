//! Ordered, append-only conversation history.

use solace_types::chat::{Turn, user_prompt};

/// The ordered history of turns for one session.
///
/// Insertion order is conversation order. The only ways to change a
/// transcript are [`push`](Transcript::push) and [`clear`](Transcript::clear).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Remove every turn. Clearing an empty transcript does nothing.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// All user turns joined by newlines, oldest first.
    ///
    /// Backends that only take one prompt string receive this instead of
    /// the role-tagged transcript.
    pub fn user_prompt_summary(&self) -> String {
        user_prompt(&self.turns)
    }
}
