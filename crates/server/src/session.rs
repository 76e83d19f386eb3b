//! Session management
//!
//! Sessions are in-memory only: each holds one agent, is touched on every
//! request, and is discarded on delete or idle expiry. One logical turn per
//! session at a time; the map itself is the only shared state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::watch;

use hostel_agent_agent::{AgentConfig, HostelAgent};
use hostel_agent_rag::QaChain;
use hostel_agent_tools::ToolRegistry;

use crate::ServerError;

/// Session state
pub struct Session {
    /// Session ID
    pub id: String,
    /// Agent instance
    pub agent: Arc<HostelAgent>,
    /// Creation time
    pub created_at: Instant,
    /// Last activity
    pub last_activity: RwLock<Instant>,
    /// Is active
    pub active: RwLock<bool>,
}

impl Session {
    /// Create a new session
    pub fn new(
        id: impl Into<String>,
        config: AgentConfig,
        tools: Arc<ToolRegistry>,
        qa: Option<Arc<QaChain>>,
    ) -> Self {
        let id = id.into();
        let agent = match qa {
            Some(qa) => HostelAgent::new(&id, config, tools, qa),
            None => HostelAgent::without_qa(&id, config, tools),
        };
        Self {
            agent: Arc::new(agent),
            id,
            created_at: Instant::now(),
            last_activity: RwLock::new(Instant::now()),
            active: RwLock::new(true),
        }
    }

    /// Update last activity
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    /// Check if session is expired
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.read().elapsed() > timeout
    }

    /// Close session
    pub fn close(&self) {
        *self.active.write() = false;
    }

    /// Is session active
    pub fn is_active(&self) -> bool {
        *self.active.read()
    }
}

/// Session manager
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    max_sessions: usize,
    session_timeout: Duration,
    cleanup_interval: Duration,
    agent_config: AgentConfig,
    tools: Arc<ToolRegistry>,
    qa: Option<Arc<QaChain>>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(
        max_sessions: usize,
        session_timeout: Duration,
        agent_config: AgentConfig,
        tools: Arc<ToolRegistry>,
        qa: Option<Arc<QaChain>>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            session_timeout,
            cleanup_interval: Duration::from_secs(300),
            agent_config,
            tools,
            qa,
        }
    }

    /// Start a background task that periodically removes expired sessions.
    ///
    /// Returns a shutdown sender that stops the task.
    pub fn start_cleanup_task(self: &Arc<Self>) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let manager = Arc::clone(self);
        let interval = manager.cleanup_interval;

        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            interval_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval_timer.tick() => {
                        let before = manager.count();
                        manager.cleanup_expired();
                        let after = manager.count();
                        if before != after {
                            tracing::info!(
                                "Session cleanup: removed {} expired sessions ({} remaining)",
                                before - after,
                                after
                            );
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            tracing::info!("Session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }

    /// Create a new session
    pub fn create(&self) -> Result<Arc<Session>, ServerError> {
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.max_sessions {
            self.cleanup_expired_internal(&mut sessions);

            if sessions.len() >= self.max_sessions {
                return Err(ServerError::Session("Max sessions reached".to_string()));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(
            &id,
            self.agent_config.clone(),
            Arc::clone(&self.tools),
            self.qa.clone(),
        ));
        sessions.insert(id.clone(), session.clone());

        tracing::info!("Created session: {}", id);

        Ok(session)
    }

    /// Get a session by ID
    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove a session
    pub fn remove(&self, id: &str) {
        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.remove(id) {
            session.close();
            tracing::info!("Removed session: {}", id);
        }
    }

    /// Get active session count
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }

    /// Cleanup expired sessions
    pub fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write();
        self.cleanup_expired_internal(&mut sessions);
    }

    fn cleanup_expired_internal(&self, sessions: &mut HashMap<String, Arc<Session>>) {
        let timeout = self.session_timeout;
        let expired: Vec<String> = sessions
            .iter()
            .filter(|(_, s)| s.is_expired(timeout))
            .map(|(id, _)| id.clone())
            .collect();

        for id in expired {
            if let Some(session) = sessions.remove(&id) {
                session.close();
                tracing::info!("Expired session: {}", id);
            }
        }
    }

    /// List all session IDs
    pub fn list(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostel_agent_config::{MenuConfig, PhotoCatalog};
    use hostel_agent_tools::create_default_registry;

    fn manager(max: usize) -> SessionManager {
        let tools = Arc::new(create_default_registry(
            MenuConfig::default(),
            PhotoCatalog::default(),
        ));
        SessionManager::new(
            max,
            Duration::from_secs(3600),
            AgentConfig::default(),
            tools,
            None,
        )
    }

    #[test]
    fn test_session_creation() {
        let manager = manager(10);
        let session = manager.create().unwrap();

        assert!(session.is_active());
        assert!(!session.is_expired(Duration::from_secs(60)));
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_session_get() {
        let manager = manager(10);
        let session = manager.create().unwrap();
        let id = session.id.clone();

        let retrieved = manager.get(&id);
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().id, id);
    }

    #[test]
    fn test_session_remove() {
        let manager = manager(10);
        let session = manager.create().unwrap();
        let id = session.id.clone();

        manager.remove(&id);
        assert!(manager.get(&id).is_none());
    }

    #[test]
    fn test_capacity_limit() {
        let manager = manager(2);
        manager.create().unwrap();
        manager.create().unwrap();
        assert!(manager.create().is_err());
    }
}
