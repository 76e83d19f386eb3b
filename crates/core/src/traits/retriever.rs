//! Retrieval trait for the knowledge-base backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Retriever interface over the external vector-search service.
///
/// The hostel knowledge base lives in a hosted vector store; this trait is
/// the seam that keeps the rest of the workspace independent of the wire
/// format.
///
/// # Example
///
/// ```ignore
/// let retriever: Arc<dyn Retriever> = Arc::new(VectorServiceRetriever::new(config)?);
/// let options = RetrieveOptions::default().with_top_k(3);
/// let docs = retriever.retrieve("what are the mess timings", &options).await?;
/// ```
#[async_trait]
pub trait Retriever: Send + Sync + 'static {
    /// Retrieve relevant documents, sorted by relevance (highest first)
    async fn retrieve(&self, query: &str, options: &RetrieveOptions) -> Result<Vec<Document>>;

    /// Get retriever name for logging
    fn name(&self) -> &str;
}

/// Retrieval options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieveOptions {
    /// Number of documents to return
    pub top_k: usize,
    /// Minimum similarity score (0.0 - 1.0)
    pub min_score: f32,
}

impl Default for RetrieveOptions {
    fn default() -> Self {
        Self {
            top_k: 3,
            min_score: 0.0,
        }
    }
}

impl RetrieveOptions {
    /// Set top_k
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set minimum score
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score.clamp(0.0, 1.0);
        self
    }
}

/// Retrieved document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document ID
    pub id: String,
    /// Document content
    pub content: String,
    /// Relevance score (0.0 - 1.0)
    pub score: f32,
    /// Source/origin of the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Document {
    /// Create a new document
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            source: None,
        }
    }

    /// Set source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieve_options_builder() {
        let options = RetrieveOptions::default().with_top_k(5).with_min_score(0.4);
        assert_eq!(options.top_k, 5);
        assert_eq!(options.min_score, 0.4);
    }

    #[test]
    fn test_document_builder() {
        let doc = Document::new("doc-1", "Mess timings: breakfast 7-9am", 0.92)
            .with_source("hostel_handbook.md");
        assert_eq!(doc.id, "doc-1");
        assert_eq!(doc.source.as_deref(), Some("hostel_handbook.md"));
    }
}
