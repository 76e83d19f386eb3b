//! MCP-compatible tool interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tool schema exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Description
    pub description: String,
    /// JSON schema of the input arguments
    pub input_schema: serde_json::Value,
}

/// A block of tool output content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text
    Text { text: String },
    /// Image by path within the photo library
    Image { path: String },
}

/// Tool execution output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Output content blocks
    pub content: Vec<ContentBlock>,
    /// Whether the output represents an error message
    #[serde(default)]
    pub is_error: bool,
}

impl ToolOutput {
    /// Single text block
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Error message as output
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Concatenated text of all text blocks
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Paths of all image blocks
    pub fn image_paths(&self) -> Vec<String> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Image { path } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Tool execution errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// A callable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool schema
    fn schema(&self) -> ToolSchema;

    /// Execute with JSON arguments
    async fn execute(&self, args: serde_json::Value) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_accessors() {
        let output = ToolOutput {
            content: vec![
                ContentBlock::Text {
                    text: "two photos".into(),
                },
                ContentBlock::Image {
                    path: "hostel_photos/rooms/rooms/a.jpg".into(),
                },
                ContentBlock::Image {
                    path: "hostel_photos/rooms/rooms/b.png".into(),
                },
            ],
            is_error: false,
        };
        assert_eq!(output.text_content(), "two photos");
        assert_eq!(output.image_paths().len(), 2);
    }

    #[test]
    fn test_content_block_serialization() {
        let block = ContentBlock::Text {
            text: "hello".into(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
    }
}
