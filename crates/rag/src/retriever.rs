//! Vector-search service client
//!
//! Implements `core::Retriever` against the hosted vector store's text-query
//! API: the service embeds the query server-side and returns scored matches,
//! so no model runs locally.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use hostel_agent_core::{Document, Error, Result, RetrieveOptions, Retriever};

use crate::RagError;

/// Vector service configuration
#[derive(Debug, Clone)]
pub struct VectorServiceConfig {
    /// Service endpoint base URL
    pub endpoint: String,
    /// API key
    pub api_key: Option<String>,
    /// Index to query
    pub index: String,
    /// Namespace within the index
    pub namespace: String,
    /// Request timeout
    pub timeout: Duration,
    /// Name for logging
    pub name: String,
}

impl Default for VectorServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.pinecone.io".to_string(),
            api_key: None,
            index: "arya-index".to_string(),
            namespace: "ns1".to_string(),
            timeout: Duration::from_secs(10),
            name: "vector_service".to_string(),
        }
    }
}

impl From<&hostel_agent_config::VectorServiceConfig> for VectorServiceConfig {
    fn from(settings: &hostel_agent_config::VectorServiceConfig) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            index: settings.index.clone(),
            namespace: settings.namespace.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            name: "vector_service".to_string(),
        }
    }
}

/// HTTP retriever over the external vector-search service
pub struct VectorServiceRetriever {
    client: Client,
    config: VectorServiceConfig,
}

impl VectorServiceRetriever {
    /// Create a new retriever
    pub fn new(config: VectorServiceConfig) -> std::result::Result<Self, RagError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RagError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the query URL for the configured index
    fn query_url(&self) -> String {
        format!(
            "{}/indexes/{}/query",
            self.config.endpoint, self.config.index
        )
    }

    async fn execute_query(
        &self,
        query: &str,
        top_k: usize,
    ) -> std::result::Result<Vec<QueryMatch>, RagError> {
        let request = QueryRequest {
            query: TextQuery {
                inputs: QueryInputs {
                    text: query.to_string(),
                },
                top_k,
            },
            namespace: self.config.namespace.clone(),
        };

        let mut builder = self.client.post(self.query_url()).json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.header("Api-Key", key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            return Err(RagError::Search(format!("query failed {status}: {error}")));
        }

        let body: QueryResponse = response
            .json()
            .await
            .map_err(|e| RagError::InvalidResponse(e.to_string()))?;

        Ok(body.matches)
    }
}

#[async_trait]
impl Retriever for VectorServiceRetriever {
    async fn retrieve(&self, query: &str, options: &RetrieveOptions) -> Result<Vec<Document>> {
        let matches = self
            .execute_query(query, options.top_k)
            .await
            .map_err(Error::from)?;

        let documents: Vec<Document> = matches
            .into_iter()
            .filter(|m| m.score >= options.min_score)
            .map(|m| {
                let source = m.metadata.source.clone();
                let mut doc = Document::new(m.id, m.metadata.text.unwrap_or_default(), m.score);
                if let Some(source) = source {
                    doc = doc.with_source(source);
                }
                doc
            })
            .collect();

        tracing::debug!(
            retriever = %self.config.name,
            count = documents.len(),
            "Retrieved documents"
        );

        Ok(documents)
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

// Vector service wire types
#[derive(Debug, Serialize)]
struct QueryRequest {
    query: TextQuery,
    namespace: String,
}

#[derive(Debug, Serialize)]
struct TextQuery {
    inputs: QueryInputs,
    top_k: usize,
}

#[derive(Debug, Serialize)]
struct QueryInputs {
    text: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: MatchMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct MatchMetadata {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url() {
        let retriever = VectorServiceRetriever::new(VectorServiceConfig::default()).unwrap();
        assert_eq!(
            retriever.query_url(),
            "https://api.pinecone.io/indexes/arya-index/query"
        );
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "matches": [
                {"id": "doc-1", "score": 0.91, "metadata": {"text": "Mess timings 7-9am", "source": "handbook"}},
                {"id": "doc-2", "score": 0.42, "metadata": {"text": "Laundry on Sundays"}}
            ]
        }"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.matches.len(), 2);
        assert_eq!(response.matches[0].metadata.source.as_deref(), Some("handbook"));
        assert!(response.matches[1].metadata.source.is_none());
    }

    #[test]
    fn test_empty_response_parses() {
        let response: QueryResponse = serde_json::from_str("{}").unwrap();
        assert!(response.matches.is_empty());
    }
}
