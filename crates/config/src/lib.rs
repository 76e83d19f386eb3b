//! Configuration management for the hostel assistant
//!
//! Supports loading configuration from:
//! - An optional settings file (`config/default.*`)
//! - Environment variables (HOSTEL_AGENT_ prefix)
//! - Bare environment variables for third-party credentials
//!
//! Domain data that changes without redeploying (the mess-menu schedule)
//! lives in its own YAML file with an embedded fallback week.

pub mod menu;
pub mod photos;
pub mod prompts;
pub mod settings;

pub use menu::{DayMenu, MealSlot, MenuConfig};
pub use photos::PhotoCatalog;
pub use prompts::PromptTemplates;
pub use settings::{
    load_settings, LlmSettings, PortalConfig, ServerConfig, Settings, VectorServiceConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required environment variables: {0}")]
    MissingEnv(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
