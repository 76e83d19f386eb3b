//! Conversational core for the hostel assistant
//!
//! Features:
//! - Keyword-based intent routing over a closed label set
//! - Complaint intake as a per-session finite-state flow
//! - Bounded chat history
//! - Orchestration over the QA chain and lookup tools

pub mod agent;
pub mod complaint;
pub mod intent;
pub mod memory;

pub use agent::{AgentConfig, AgentEvent, AgentReply, HostelAgent};
pub use complaint::{ComplaintFlow, ComplaintOutcome, ComplaintState, FlowStep};
pub use intent::{IntentRouter, MenuRequest, MessageIntent, PhotoSelector};
pub use memory::ChatHistory;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Complaint flow error: {0}")]
    Complaint(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("URL error: {0}")]
    Url(String),
}

impl From<hostel_agent_tools::ToolError> for AgentError {
    fn from(err: hostel_agent_tools::ToolError) -> Self {
        AgentError::Tool(err.to_string())
    }
}
