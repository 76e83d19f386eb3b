//! QA chain
//!
//! Retrieve, build the prompt, generate. Every upstream failure collapses
//! into one apology message at the user boundary; the underlying error is
//! logged.

use std::sync::Arc;

use hostel_agent_config::PromptTemplates;
use hostel_agent_core::{RetrieveOptions, Retriever};
use hostel_agent_llm::{LlmBackend, Message, PromptBuilder};

/// QA chain configuration
#[derive(Debug, Clone)]
pub struct QaChainConfig {
    /// Documents to retrieve per question
    pub top_k: usize,
    /// Minimum document score
    pub min_score: f32,
}

impl Default for QaChainConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            min_score: 0.0,
        }
    }
}

/// Retrieval-augmented answer generation
pub struct QaChain {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LlmBackend>,
    templates: PromptTemplates,
    config: QaChainConfig,
}

impl QaChain {
    /// Create a new chain
    pub fn new(
        retriever: Arc<dyn Retriever>,
        llm: Arc<dyn LlmBackend>,
        templates: PromptTemplates,
        config: QaChainConfig,
    ) -> Self {
        Self {
            retriever,
            llm,
            templates,
            config,
        }
    }

    /// Answer a question from the knowledge base.
    ///
    /// Never fails at this boundary: retrieval or generation errors return
    /// the configured apology message.
    pub async fn answer(&self, question: &str, history: &[Message]) -> String {
        match self.try_answer(question, history).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("QA chain failed: {}", e);
                self.templates.apology.clone()
            }
        }
    }

    async fn try_answer(
        &self,
        question: &str,
        history: &[Message],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let options = RetrieveOptions::default()
            .with_top_k(self.config.top_k)
            .with_min_score(self.config.min_score);

        let documents = self.retriever.retrieve(question, &options).await?;

        let context = documents
            .iter()
            .map(|d| d.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let messages = PromptBuilder::new(self.templates.clone())
            .system_prompt()
            .with_context(&context)
            .with_history(history)
            .user_message(question)
            .build();

        let result = self.llm.generate(&messages).await?;

        tracing::debug!(
            retriever = %self.retriever.name(),
            model = %self.llm.model_name(),
            docs = documents.len(),
            latency_ms = result.total_time_ms,
            "Answered question"
        );

        Ok(result.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hostel_agent_core::{Document, Result};
    use hostel_agent_llm::{GenerationResult, LlmError};

    struct FixedRetriever {
        fail: bool,
    }

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(&self, _query: &str, _options: &RetrieveOptions) -> Result<Vec<Document>> {
            if self.fail {
                return Err(hostel_agent_core::Error::Retrieval("down".into()));
            }
            Ok(vec![Document::new("d1", "Breakfast is 7-9am.", 0.9)])
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct EchoBackend;

    #[async_trait]
    impl LlmBackend for EchoBackend {
        async fn generate(&self, messages: &[Message]) -> std::result::Result<GenerationResult, LlmError> {
            Ok(GenerationResult {
                text: format!("answered from {} messages", messages.len()),
                total_time_ms: 1,
            })
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    fn chain(fail_retrieval: bool) -> QaChain {
        QaChain::new(
            Arc::new(FixedRetriever { fail: fail_retrieval }),
            Arc::new(EchoBackend),
            PromptTemplates::default(),
            QaChainConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_answer_happy_path() {
        let answer = chain(false).answer("when is breakfast", &[]).await;
        assert!(answer.starts_with("answered from"));
    }

    #[tokio::test]
    async fn test_upstream_failure_yields_apology() {
        let chain = chain(true);
        let answer = chain.answer("when is breakfast", &[]).await;
        assert_eq!(answer, PromptTemplates::default().apology);
    }
}
