//! Hostel assistant agent
//!
//! Per-session orchestrator: routes each message to the complaint flow, a
//! lookup tool, or the QA chain, and tracks history.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;

use hostel_agent_config::{PortalConfig, PromptTemplates};
use hostel_agent_core::{ComplaintCategory, Turn, TurnMetadata};
use hostel_agent_rag::QaChain;
use hostel_agent_tools::{ToolExecutor, ToolRegistry};

use crate::complaint::{self, ComplaintFlow, ComplaintState, FlowStep};
use crate::intent::{IntentRouter, MenuRequest, MessageIntent, PhotoSelector};
use crate::memory::ChatHistory;
use crate::AgentError;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Prompt and response templates
    pub templates: PromptTemplates,
    /// Complaint portal
    pub portal: PortalConfig,
    /// Maximum retained history turns
    pub history_limit: usize,
    /// History turns passed to the QA chain
    pub qa_history_turns: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            templates: PromptTemplates::default(),
            portal: PortalConfig::default(),
            history_limit: crate::memory::DEFAULT_HISTORY_LIMIT,
            qa_history_turns: 6,
        }
    }
}

/// Agent events
#[derive(Debug, Clone)]
pub enum AgentEvent {
    /// Message routed to an intent
    IntentRouted(MessageIntent),
    /// Complaint intake started
    ComplaintStarted(ComplaintCategory),
    /// Complaint intake finished with a portal URL
    ComplaintCompleted { portal_url: String },
    /// Complaint intake cancelled
    ComplaintCancelled,
    /// Response ready
    Response(String),
}

/// One reply from the agent
#[derive(Debug, Clone, Serialize)]
pub struct AgentReply {
    /// Reply text
    pub text: String,
    /// Intent the message was routed to
    pub intent: MessageIntent,
    /// Photo paths, for photo lookups
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
    /// Pre-filled portal URL, when a complaint flow just completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_url: Option<String>,
    /// Complaint-flow state after this turn, when a flow is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_state: Option<String>,
}

impl AgentReply {
    fn text_only(text: impl Into<String>, intent: MessageIntent) -> Self {
        Self {
            text: text.into(),
            intent,
            photos: Vec::new(),
            portal_url: None,
            flow_state: None,
        }
    }
}

/// Hostel assistant agent, one per session
pub struct HostelAgent {
    session_id: String,
    config: AgentConfig,
    router: IntentRouter,
    flow: Mutex<Option<ComplaintFlow>>,
    history: ChatHistory,
    tools: Arc<ToolRegistry>,
    qa: Option<Arc<QaChain>>,
    event_tx: broadcast::Sender<AgentEvent>,
}

impl HostelAgent {
    /// Create an agent with a QA chain
    pub fn new(
        session_id: impl Into<String>,
        config: AgentConfig,
        tools: Arc<ToolRegistry>,
        qa: Arc<QaChain>,
    ) -> Self {
        Self::build(session_id, config, tools, Some(qa))
    }

    /// Create an agent without a QA chain; general questions get the
    /// apology message until one is wired in
    pub fn without_qa(
        session_id: impl Into<String>,
        config: AgentConfig,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self::build(session_id, config, tools, None)
    }

    fn build(
        session_id: impl Into<String>,
        config: AgentConfig,
        tools: Arc<ToolRegistry>,
        qa: Option<Arc<QaChain>>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let history = ChatHistory::new(config.history_limit);
        Self {
            session_id: session_id.into(),
            config,
            router: IntentRouter::new(),
            flow: Mutex::new(None),
            history,
            tools,
            qa,
            event_tx,
        }
    }

    /// Subscribe to agent events
    pub fn subscribe(&self) -> broadcast::Receiver<AgentEvent> {
        self.event_tx.subscribe()
    }

    /// Session this agent belongs to
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Conversation history
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    /// State of the active complaint flow, if any
    pub fn flow_state(&self) -> Option<ComplaintState> {
        self.flow.lock().as_ref().map(|f| f.state())
    }

    /// Greeting for a fresh session
    pub fn greeting(&self) -> String {
        self.config.templates.greeting_message()
    }

    /// Process one user message and produce a reply
    pub async fn process(&self, input: &str) -> Result<AgentReply, AgentError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(AgentReply::text_only(
                "Please provide a valid question.",
                MessageIntent::GeneralQa,
            ));
        }

        // An active complaint flow consumes the turn before any routing
        let reply = if self.flow.lock().is_some() {
            self.continue_complaint(input)?
        } else {
            let intent = self.router.classify(input);
            let _ = self.event_tx.send(AgentEvent::IntentRouted(intent));
            tracing::debug!(session = %self.session_id, intent = %intent, "Routed message");

            match intent {
                MessageIntent::Complaint => self.start_complaint(input),
                MessageIntent::MessMenu => self.lookup_menu(input).await?,
                MessageIntent::Photos => self.lookup_photos(input).await?,
                MessageIntent::GeneralQa => self.answer_question(input).await,
            }
        };

        self.history.push(
            Turn::user(input).with_metadata(TurnMetadata::new().with_intent(reply.intent.as_str())),
        );
        self.history.push(Turn::assistant(&reply.text));

        let _ = self.event_tx.send(AgentEvent::Response(reply.text.clone()));
        Ok(reply)
    }

    fn start_complaint(&self, input: &str) -> AgentReply {
        let category = self.router.classify_category(input);
        let (flow, message) = ComplaintFlow::start(input, category);
        let state = flow.state().to_string();
        *self.flow.lock() = Some(flow);

        let _ = self.event_tx.send(AgentEvent::ComplaintStarted(category));

        AgentReply {
            text: message,
            intent: MessageIntent::Complaint,
            photos: Vec::new(),
            portal_url: None,
            flow_state: Some(state),
        }
    }

    fn continue_complaint(&self, input: &str) -> Result<AgentReply, AgentError> {
        if complaint::is_cancel_message(input) {
            *self.flow.lock() = None;
            let _ = self.event_tx.send(AgentEvent::ComplaintCancelled);
            return Ok(AgentReply::text_only(
                complaint::cancel_message(),
                MessageIntent::Complaint,
            ));
        }

        let mut guard = self.flow.lock();
        let flow = guard
            .as_mut()
            .ok_or_else(|| AgentError::Complaint("no active flow".to_string()))?;

        match flow.advance(input, &self.config.portal)? {
            FlowStep::Prompt { message, .. } => {
                let state = flow.state().to_string();
                Ok(AgentReply {
                    text: message,
                    intent: MessageIntent::Complaint,
                    photos: Vec::new(),
                    portal_url: None,
                    flow_state: Some(state),
                })
            }
            FlowStep::Completed(outcome) => {
                *guard = None;
                let _ = self.event_tx.send(AgentEvent::ComplaintCompleted {
                    portal_url: outcome.portal_url.clone(),
                });
                Ok(AgentReply {
                    text: outcome.summary,
                    intent: MessageIntent::Complaint,
                    photos: Vec::new(),
                    portal_url: Some(outcome.portal_url),
                    flow_state: Some(ComplaintState::Done.to_string()),
                })
            }
        }
    }

    async fn lookup_menu(&self, input: &str) -> Result<AgentReply, AgentError> {
        let args = match self.router.menu_request(input) {
            MenuRequest::Current => serde_json::json!({}),
            MenuRequest::Day(day) => serde_json::json!({ "day": day }),
            MenuRequest::Week => serde_json::json!({ "day": "week" }),
        };

        let output = self.tools.execute("mess_menu", args).await?;
        Ok(AgentReply::text_only(
            output.text_content(),
            MessageIntent::MessMenu,
        ))
    }

    async fn lookup_photos(&self, input: &str) -> Result<AgentReply, AgentError> {
        let args = match self.router.photo_selector(input) {
            Some(PhotoSelector::Category {
                category,
                subcategory,
            }) => match subcategory {
                Some(sub) => serde_json::json!({ "category": category, "subcategory": sub }),
                None => serde_json::json!({ "category": category }),
            },
            Some(PhotoSelector::All) => serde_json::json!({}),
            None => {
                return Ok(AgentReply::text_only(
                    "I have photos of the rooms, mess, facilities, and exterior. \
                     Which would you like to see?",
                    MessageIntent::Photos,
                ));
            }
        };

        let output = self.tools.execute("hostel_photos", args).await?;
        Ok(AgentReply {
            text: output.text_content(),
            intent: MessageIntent::Photos,
            photos: output.image_paths(),
            portal_url: None,
            flow_state: None,
        })
    }

    async fn answer_question(&self, input: &str) -> AgentReply {
        let text = match &self.qa {
            Some(qa) => {
                let history = self.history.recent_messages(self.config.qa_history_turns);
                qa.answer(input, &history).await
            }
            None => {
                tracing::warn!(session = %self.session_id, "QA chain not configured");
                self.config.templates.apology.clone()
            }
        };

        AgentReply::text_only(text, MessageIntent::GeneralQa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_agent_config::{MenuConfig, PhotoCatalog};
    use hostel_agent_tools::create_default_registry;

    fn agent() -> HostelAgent {
        let tools = Arc::new(create_default_registry(
            MenuConfig::default(),
            PhotoCatalog::default(),
        ));
        HostelAgent::without_qa("test-session", AgentConfig::default(), tools)
    }

    #[tokio::test]
    async fn test_empty_message() {
        let agent = agent();
        let reply = agent.process("   ").await.unwrap();
        assert!(reply.text.contains("valid question"));
    }

    #[tokio::test]
    async fn test_menu_route() {
        let agent = agent();
        let reply = agent.process("what's on the menu for monday").await.unwrap();
        assert_eq!(reply.intent, MessageIntent::MessMenu);
        assert!(reply.text.starts_with("Monday menu:"));
    }

    #[tokio::test]
    async fn test_general_question_without_qa_apologizes() {
        let agent = agent();
        let reply = agent.process("what are the hostel rules").await.unwrap();
        assert_eq!(reply.intent, MessageIntent::GeneralQa);
        assert_eq!(reply.text, PromptTemplates::default().apology);
    }

    #[tokio::test]
    async fn test_complaint_flow_end_to_end() {
        let agent = agent();

        let reply = agent.process("my ceiling fan is not working").await.unwrap();
        assert_eq!(reply.intent, MessageIntent::Complaint);
        assert_eq!(reply.flow_state.as_deref(), Some("collect_name"));
        assert!(reply.text.contains("electrical issue"));

        let reply = agent.process("John Doe").await.unwrap();
        assert_eq!(reply.flow_state.as_deref(), Some("collect_email"));

        // invalid email re-prompts without advancing
        let reply = agent.process("not-an-email").await.unwrap();
        assert_eq!(reply.flow_state.as_deref(), Some("collect_email"));

        let reply = agent.process("john.doe@ietlucknow.ac.in").await.unwrap();
        assert_eq!(reply.flow_state.as_deref(), Some("collect_phone"));

        let reply = agent.process("9876543210").await.unwrap();
        assert_eq!(reply.flow_state.as_deref(), Some("collect_room"));

        let reply = agent.process("A-101").await.unwrap();
        assert_eq!(reply.flow_state.as_deref(), Some("done"));
        assert!(reply.portal_url.is_some());
        assert!(reply.text.contains("Complaint Summary"));
        assert!(agent.flow_state().is_none());

        let url = reply.portal_url.unwrap();
        assert!(url.contains("name=John+Doe"));
        assert!(url.contains("room=A-101"));
    }

    #[tokio::test]
    async fn test_complaint_cancellation() {
        let agent = agent();
        agent.process("the wifi is not working").await.unwrap();
        assert!(agent.flow_state().is_some());

        let reply = agent.process("cancel").await.unwrap();
        assert!(reply.text.contains("cancelled"));
        assert!(agent.flow_state().is_none());
    }

    #[tokio::test]
    async fn test_flow_consumes_turns_before_routing() {
        let agent = agent();
        agent.process("I have a problem, my room is dirty").await.unwrap();

        // "menu" would route to MessMenu, but the flow is collecting a name
        let reply = agent.process("Menu Kumar").await.unwrap();
        assert_eq!(reply.intent, MessageIntent::Complaint);
        assert_eq!(reply.flow_state.as_deref(), Some("collect_email"));
    }

    #[tokio::test]
    async fn test_history_recorded() {
        let agent = agent();
        agent.process("hello there").await.unwrap();
        assert_eq!(agent.history().len(), 2);
    }

    #[tokio::test]
    async fn test_events_published() {
        let agent = agent();
        let mut rx = agent.subscribe();
        agent.process("show me the rooms").await.unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            AgentEvent::IntentRouted(MessageIntent::Photos)
        ));
    }
}
