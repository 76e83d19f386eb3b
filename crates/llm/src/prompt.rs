//! Prompt building
//!
//! Constructs prompts for knowledge-base answers.

use std::fmt;

use serde::{Deserialize, Serialize};

use hostel_agent_config::PromptTemplates;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Prompt builder for the hostel assistant
pub struct PromptBuilder {
    messages: Vec<Message>,
    templates: PromptTemplates,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(templates: PromptTemplates) -> Self {
        Self {
            messages: Vec::new(),
            templates,
        }
    }

    /// Add the assistant system prompt
    pub fn system_prompt(mut self) -> Self {
        self.messages
            .push(Message::system(self.templates.qa_system_prompt()));
        self
    }

    /// Add retrieved knowledge-base context
    pub fn with_context(mut self, context: &str) -> Self {
        if !context.is_empty() {
            let context_msg = format!(
                "Context information from the knowledge base:\n{}\n\nUse this information to answer the question if relevant.",
                context
            );
            self.messages.push(Message::system(context_msg));
        }
        self
    }

    /// Add conversation history
    pub fn with_history(mut self, history: &[Message]) -> Self {
        self.messages.extend(history.iter().cloned());
        self
    }

    /// Add the current user question
    pub fn user_message(mut self, message: &str) -> Self {
        self.messages.push(Message::user(message));
        self
    }

    /// Build the final message list
    pub fn build(self) -> Vec<Message> {
        self.messages
    }
}

/// Flatten messages into a single prompt for text-generation endpoints
/// that take one input string rather than a chat transcript.
pub fn flatten(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for message in messages {
        match message.role {
            Role::System => {
                prompt.push_str(&message.content);
                prompt.push_str("\n\n");
            }
            Role::User => {
                prompt.push_str("Question: ");
                prompt.push_str(&message.content);
                prompt.push('\n');
            }
            Role::Assistant => {
                prompt.push_str("Answer: ");
                prompt.push_str(&message.content);
                prompt.push('\n');
            }
        }
    }
    prompt.push_str("Answer:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let msg = Message::user("What are the mess timings?");
        assert_eq!(msg.role, Role::User);
    }

    #[test]
    fn test_prompt_builder() {
        let messages = PromptBuilder::new(PromptTemplates::default())
            .system_prompt()
            .with_context("Breakfast is served 7-9am.")
            .user_message("When is breakfast?")
            .build();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].content.contains("Breakfast is served"));
    }

    #[test]
    fn test_empty_context_skipped() {
        let messages = PromptBuilder::new(PromptTemplates::default())
            .system_prompt()
            .with_context("")
            .user_message("hello")
            .build();
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_flatten_ends_with_answer_cue() {
        let messages = vec![
            Message::system("You are a helpful assistant."),
            Message::user("When is breakfast?"),
        ];
        let prompt = flatten(&messages);
        assert!(prompt.contains("Question: When is breakfast?"));
        assert!(prompt.ends_with("Answer:"));
    }
}
