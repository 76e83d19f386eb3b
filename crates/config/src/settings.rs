//! Application settings
//!
//! Layered loading: an optional settings file, then environment variables
//! with the `HOSTEL_AGENT_` prefix (double underscore separates sections,
//! e.g. `HOSTEL_AGENT_SERVER__PORT=8080`). Third-party credentials are read
//! from bare environment variables and validated together so a misconfigured
//! deployment fails at startup with every missing name listed.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// External vector-search service
    #[serde(default)]
    pub vector: VectorServiceConfig,

    /// Hosted LLM endpoint
    #[serde(default)]
    pub llm: LlmSettings,

    /// Complaint portal
    #[serde(default)]
    pub portal: PortalConfig,

    /// Path to the mess-menu YAML file (embedded default week used if unset
    /// or unreadable)
    #[serde(default)]
    pub menu_file: Option<String>,

    /// Root directory of the hostel photo library
    #[serde(default = "default_photos_dir")]
    pub photos_dir: String,
}

fn default_photos_dir() -> String {
    "hostel_photos".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            vector: VectorServiceConfig::default(),
            llm: LlmSettings::default(),
            portal: PortalConfig::default(),
            menu_file: None,
            photos_dir: default_photos_dir(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Enforce the configured CORS origins; disabled means permissive (dev)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Maximum concurrent sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Idle session timeout in seconds
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_true() -> bool {
    true
}
fn default_max_sessions() -> usize {
    500
}
fn default_session_timeout() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            max_sessions: default_max_sessions(),
            session_timeout_secs: default_session_timeout(),
        }
    }
}

/// External vector-search service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorServiceConfig {
    /// Service endpoint base URL
    #[serde(default = "default_vector_endpoint")]
    pub endpoint: String,

    /// API key (from PINECONE_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Index to query
    #[serde(default = "default_index")]
    pub index: String,

    /// Namespace within the index
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Request timeout in seconds
    #[serde(default = "default_vector_timeout")]
    pub timeout_secs: u64,
}

fn default_vector_endpoint() -> String {
    "https://api.pinecone.io".to_string()
}
fn default_index() -> String {
    "arya-index".to_string()
}
fn default_namespace() -> String {
    "ns1".to_string()
}
fn default_vector_timeout() -> u64 {
    10
}

impl Default for VectorServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_vector_endpoint(),
            api_key: None,
            index: default_index(),
            namespace: default_namespace(),
            timeout_secs: default_vector_timeout(),
        }
    }
}

/// Hosted LLM endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Model repository id
    #[serde(default = "default_model")]
    pub model: String,

    /// Inference endpoint base URL
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// API token (from HUGGING_FACE_API)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()
}
fn default_llm_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}
fn default_max_tokens() -> usize {
    512
}
fn default_temperature() -> f32 {
    0.7
}
fn default_top_p() -> f32 {
    0.9
}
fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_llm_endpoint(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Complaint portal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the grievance portal's open-ticket form
    #[serde(default = "default_portal_url")]
    pub base_url: String,

    /// Maximum subject length accepted by the form
    #[serde(default = "default_subject_len")]
    pub max_subject_len: usize,
}

fn default_portal_url() -> String {
    "https://grs.ietlucknow.ac.in/open.php".to_string()
}
fn default_subject_len() -> usize {
    100
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: default_portal_url(),
            max_subject_len: default_subject_len(),
        }
    }
}

/// Environment variables holding third-party credentials
const CREDENTIAL_VARS: &[&str] = &["PINECONE_API_KEY", "HUGGING_FACE_API"];

/// Load settings from the optional file plus environment.
///
/// Credentials are required unless `require_credentials` is false (tests,
/// offline development); when any are missing the error names all of them.
pub fn load_settings(path: Option<&str>, require_credentials: bool) -> Result<Settings, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path).required(false));
    } else {
        builder = builder.add_source(config::File::with_name("config/default").required(false));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("HOSTEL_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let mut settings: Settings = builder.build()?.try_deserialize()?;

    // Credentials come from bare env vars, matching how deployments set them
    if settings.vector.api_key.is_none() {
        settings.vector.api_key = std::env::var("PINECONE_API_KEY").ok();
    }
    if settings.llm.api_key.is_none() {
        settings.llm.api_key = std::env::var("HUGGING_FACE_API").ok();
    }

    if require_credentials {
        let missing: Vec<&str> = CREDENTIAL_VARS
            .iter()
            .copied()
            .filter(|var| match *var {
                "PINECONE_API_KEY" => settings.vector.api_key.is_none(),
                "HUGGING_FACE_API" => settings.llm.api_key.is_none(),
                _ => false,
            })
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing.join(", ")));
        }
    }

    tracing::debug!(
        host = %settings.server.host,
        port = settings.server.port,
        model = %settings.llm.model,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.portal.base_url, "https://grs.ietlucknow.ac.in/open.php");
        assert_eq!(settings.portal.max_subject_len, 100);
        assert!(settings.server.cors_enabled);
    }

    #[test]
    fn test_load_without_credentials() {
        let settings = load_settings(None, false).unwrap();
        assert_eq!(settings.llm.max_tokens, 512);
    }

    #[test]
    fn test_missing_credentials_are_named() {
        // Only meaningful when the vars are absent from the environment
        if std::env::var("PINECONE_API_KEY").is_err() && std::env::var("HUGGING_FACE_API").is_err()
        {
            let err = load_settings(None, true).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("PINECONE_API_KEY"));
            assert!(msg.contains("HUGGING_FACE_API"));
        }
    }
}
