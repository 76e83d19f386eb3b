//! Tool registry

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use hostel_agent_config::{MenuConfig, PhotoCatalog};

use crate::mcp::{Tool, ToolError, ToolOutput, ToolSchema};
use crate::mess_menu::MessMenuTool;
use crate::photos::HostelPhotosTool;

/// Executes tools by name
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool with JSON arguments
    async fn execute(&self, name: &str, args: serde_json::Value) -> Result<ToolOutput, ToolError>;

    /// List registered tool schemas
    fn list_tools(&self) -> Vec<ToolSchema>;
}

/// In-process tool registry
#[derive(Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its schema name
    pub fn register(&self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        tracing::debug!("Registered tool: {}", name);
        self.tools.write().insert(name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.read().is_empty()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(&self, name: &str, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.execute(args).await
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> =
            self.tools.read().values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }
}

/// Registry with the standard hostel tools
pub fn create_default_registry(menu: MenuConfig, photos: PhotoCatalog) -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(MessMenuTool::new(menu)));
    registry.register(Arc::new(HostelPhotosTool::new(photos)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_registry() {
        let registry = create_default_registry(MenuConfig::default(), PhotoCatalog::default());
        assert_eq!(registry.len(), 2);

        let names: Vec<String> = registry.list_tools().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["hostel_photos", "mess_menu"]);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("nope", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
