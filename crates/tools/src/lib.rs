//! Lookup tools for the hostel assistant
//!
//! Implements an MCP-compatible tool interface with the hostel's static
//! lookups: the mess-menu schedule and the photo library.

pub mod mcp;
pub mod mess_menu;
pub mod photos;
pub mod registry;

pub use mcp::{ContentBlock, Tool, ToolError, ToolOutput, ToolSchema};
pub use mess_menu::MessMenuTool;
pub use photos::HostelPhotosTool;
pub use registry::{create_default_registry, ToolExecutor, ToolRegistry};
