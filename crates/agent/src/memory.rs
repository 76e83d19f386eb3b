//! Bounded chat history
//!
//! Working memory only: the complaint flow is the single piece of cross-turn
//! state this assistant needs, so history exists to give the QA chain recent
//! context and the UI something to render.

use std::collections::VecDeque;

use parking_lot::RwLock;

use hostel_agent_core::{Turn, TurnRole};
use hostel_agent_llm::{Message, Role};

/// Default cap on retained turns
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded conversation history
pub struct ChatHistory {
    turns: RwLock<VecDeque<Turn>>,
    limit: usize,
}

impl ChatHistory {
    /// History retaining at most `limit` turns; the oldest are dropped first
    pub fn new(limit: usize) -> Self {
        Self {
            turns: RwLock::new(VecDeque::new()),
            limit: limit.max(1),
        }
    }

    /// Append a turn, evicting the oldest past the cap
    pub fn push(&self, turn: Turn) {
        let mut turns = self.turns.write();
        turns.push_back(turn);
        while turns.len() > self.limit {
            turns.pop_front();
        }
    }

    /// All retained turns, oldest first
    pub fn turns(&self) -> Vec<Turn> {
        self.turns.read().iter().cloned().collect()
    }

    /// The most recent `n` turns as LLM messages, oldest first
    pub fn recent_messages(&self, n: usize) -> Vec<Message> {
        let turns = self.turns.read();
        turns
            .iter()
            .rev()
            .take(n)
            .rev()
            .map(|turn| Message {
                role: match turn.role {
                    TurnRole::User => Role::User,
                    TurnRole::Assistant => Role::Assistant,
                    TurnRole::System => Role::System,
                },
                content: turn.content.clone(),
            })
            .collect()
    }

    /// Number of retained turns
    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }

    /// Drop everything
    pub fn clear(&self) {
        self.turns.write().clear();
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_len() {
        let history = ChatHistory::default();
        history.push(Turn::user("hello"));
        history.push(Turn::assistant("hi there"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let history = ChatHistory::new(3);
        for i in 0..5 {
            history.push(Turn::user(format!("message {i}")));
        }
        let turns = history.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "message 2");
        assert_eq!(turns[2].content, "message 4");
    }

    #[test]
    fn test_recent_messages_order() {
        let history = ChatHistory::default();
        history.push(Turn::user("first"));
        history.push(Turn::assistant("second"));
        history.push(Turn::user("third"));

        let messages = history.recent_messages(2);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "second");
        assert_eq!(messages[1].content, "third");
        assert_eq!(messages[0].role, Role::Assistant);
    }

    #[test]
    fn test_clear() {
        let history = ChatHistory::default();
        history.push(Turn::user("hello"));
        history.clear();
        assert!(history.is_empty());
    }
}
