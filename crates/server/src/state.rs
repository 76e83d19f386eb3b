//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use hostel_agent_agent::AgentConfig;
use hostel_agent_config::{MenuConfig, PhotoCatalog, PromptTemplates, Settings};
use hostel_agent_llm::{InferenceApiBackend, LlmConfig};
use hostel_agent_rag::{QaChain, QaChainConfig, VectorServiceConfig, VectorServiceRetriever};
use hostel_agent_tools::{create_default_registry, ToolRegistry};

use crate::session::SessionManager;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded settings
    pub settings: Arc<Settings>,
    /// Session manager
    pub sessions: Arc<SessionManager>,
    /// Tool registry
    pub tools: Arc<ToolRegistry>,
}

impl AppState {
    /// Build state from settings, wiring the QA chain when both upstream
    /// credentials are present. Without them the agents still serve menu,
    /// photo, and complaint traffic.
    pub fn new(settings: Settings) -> Self {
        let templates = PromptTemplates::default();

        let menu = MenuConfig::load(settings.menu_file.as_deref());
        let photos = PhotoCatalog::new(settings.photos_dir.clone());
        let tools = Arc::new(create_default_registry(menu, photos));

        let qa = Self::build_qa_chain(&settings, templates.clone());
        if qa.is_none() {
            tracing::warn!("QA chain disabled: missing vector-service or LLM credentials");
        }

        let agent_config = AgentConfig {
            templates,
            portal: settings.portal.clone(),
            ..AgentConfig::default()
        };

        let sessions = Arc::new(SessionManager::new(
            settings.server.max_sessions,
            Duration::from_secs(settings.server.session_timeout_secs),
            agent_config,
            Arc::clone(&tools),
            qa,
        ));

        Self {
            settings: Arc::new(settings),
            sessions,
            tools,
        }
    }

    fn build_qa_chain(settings: &Settings, templates: PromptTemplates) -> Option<Arc<QaChain>> {
        settings.vector.api_key.as_ref()?;
        settings.llm.api_key.as_ref()?;

        let retriever = VectorServiceRetriever::new(VectorServiceConfig::from(&settings.vector))
            .map_err(|e| tracing::error!("Failed to build retriever: {}", e))
            .ok()?;
        let llm = InferenceApiBackend::new(LlmConfig::from(&settings.llm))
            .map_err(|e| tracing::error!("Failed to build LLM backend: {}", e))
            .ok()?;

        Some(Arc::new(QaChain::new(
            Arc::new(retriever),
            Arc::new(llm),
            templates,
            QaChainConfig::default(),
        )))
    }
}
