//! Retrieval-augmented QA
//!
//! The knowledge base is a hosted vector-search service; this crate holds
//! the HTTP retriever for it and the chain that turns retrieved context
//! plus a question into an answer.

pub mod chain;
pub mod retriever;

pub use chain::{QaChain, QaChainConfig};
pub use retriever::{VectorServiceConfig, VectorServiceRetriever};

use thiserror::Error;

/// RAG errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Search error: {0}")]
    Search(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for RagError {
    fn from(err: reqwest::Error) -> Self {
        RagError::Search(err.to_string())
    }
}

impl From<RagError> for hostel_agent_core::Error {
    fn from(err: RagError) -> Self {
        hostel_agent_core::Error::Retrieval(err.to_string())
    }
}
