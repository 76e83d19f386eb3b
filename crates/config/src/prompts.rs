//! Prompt and response templates

use serde::{Deserialize, Serialize};

/// Templates used across the QA path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptTemplates {
    /// Assistant name used in the system prompt and greetings
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Hostel the assistant speaks for
    #[serde(default = "default_hostel_name")]
    pub hostel_name: String,

    /// System prompt for knowledge-base answers
    #[serde(default = "default_qa_system")]
    pub qa_system: String,

    /// Reply when an upstream service fails
    #[serde(default = "default_apology")]
    pub apology: String,

    /// First message of a fresh session
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

fn default_assistant_name() -> String {
    "Arya".to_string()
}

fn default_hostel_name() -> String {
    "Arya Bhatt Hostel".to_string()
}

fn default_qa_system() -> String {
    r#"You are {name}, the official assistant of {hostel}. Your role is to provide accurate and helpful information about the hostel.

Guidelines:
- Provide concise, accurate answers based on the given context
- If information is not available in the context, politely say you don't know
- Be friendly and professional in your responses
- Keep responses brief but informative"#
        .to_string()
}

fn default_apology() -> String {
    "Sorry, I couldn't process that right now. Please try again in a moment.".to_string()
}

fn default_greeting() -> String {
    "Welcome! Ask me anything about {hostel} - facilities, rules, the mess menu, or report an issue with your room.".to_string()
}

impl PromptTemplates {
    /// The QA system prompt with name placeholders filled in
    pub fn qa_system_prompt(&self) -> String {
        self.qa_system
            .replace("{name}", &self.assistant_name)
            .replace("{hostel}", &self.hostel_name)
    }

    /// The session greeting with placeholders filled in
    pub fn greeting_message(&self) -> String {
        self.greeting.replace("{hostel}", &self.hostel_name)
    }
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            hostel_name: default_hostel_name(),
            qa_system: default_qa_system(),
            apology: default_apology(),
            greeting: default_greeting(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_filled() {
        let templates = PromptTemplates::default();
        let system = templates.qa_system_prompt();
        assert!(system.contains("Arya"));
        assert!(system.contains("Arya Bhatt Hostel"));
        assert!(!system.contains("{name}"));

        let greeting = templates.greeting_message();
        assert!(greeting.contains("Arya Bhatt Hostel"));
    }
}
