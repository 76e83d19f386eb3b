//! LLM backend
//!
//! Client for a hosted text-generation endpoint (Hugging Face inference API
//! wire format) with retry on transient failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use hostel_agent_config::LlmSettings;

use crate::prompt::{flatten, Message};
use crate::LlmError;

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model repository id
    pub model: String,
    /// API endpoint base
    pub endpoint: String,
    /// API token
    pub api_key: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: usize,
    /// Temperature
    pub temperature: f32,
    /// Top-p sampling
    pub top_p: f32,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry)
    pub initial_backoff: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
            endpoint: "https://api-inference.huggingface.co".to_string(),
            api_key: None,
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.9,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
        }
    }
}

impl From<&LlmSettings> for LlmConfig {
    fn from(settings: &LlmSettings) -> Self {
        Self {
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            top_p: settings.top_p,
            timeout: Duration::from_secs(settings.timeout_secs),
            ..Self::default()
        }
    }
}

/// LLM generation result
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// Total generation time (ms)
    pub total_time_ms: u64,
}

/// LLM Backend trait
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate a response
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError>;

    /// Check if the model endpoint is reachable
    async fn is_available(&self) -> bool;

    /// Get model name
    fn model_name(&self) -> &str;

    /// Estimate tokens
    fn estimate_tokens(&self, text: &str) -> usize {
        // Rough estimate: ~4 characters per token
        text.len() / 4
    }
}

/// Hosted inference API backend
#[derive(Clone)]
pub struct InferenceApiBackend {
    client: Client,
    config: LlmConfig,
}

impl InferenceApiBackend {
    /// Create a new backend
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the model URL
    fn model_url(&self) -> String {
        format!("{}/models/{}", self.config.endpoint, self.config.model)
    }

    /// Execute a single request (used by the retry loop)
    async fn execute_request(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let mut builder = self.client.post(self.model_url()).json(request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error = response.text().await.unwrap_or_default();
            // 5xx errors are retryable, 4xx are not
            if status.is_server_error() {
                return Err(LlmError::Network(format!("Server error {status}: {error}")));
            }
            return Err(LlmError::Api(error));
        }

        let outputs: Vec<GenerateOutput> = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| LlmError::InvalidResponse("empty generation list".to_string()))
    }

    /// Check if an error is retryable
    fn is_retryable(error: &LlmError) -> bool {
        matches!(error, LlmError::Network(_) | LlmError::Timeout)
    }
}

#[async_trait]
impl LlmBackend for InferenceApiBackend {
    /// Generate a response with exponential-backoff retry for transient
    /// failures; non-retryable API errors fail immediately.
    async fn generate(&self, messages: &[Message]) -> Result<GenerationResult, LlmError> {
        let start = std::time::Instant::now();

        let request = GenerateRequest {
            inputs: flatten(messages),
            parameters: GenerateParameters {
                max_new_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                return_full_text: false,
            },
        };

        let mut last_error = None;
        let mut backoff = self.config.initial_backoff;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::warn!(
                    "LLM request failed, retrying in {:?} (attempt {}/{})",
                    backoff,
                    attempt,
                    self.config.max_retries
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }

            match self.execute_request(&request).await {
                Ok(text) => {
                    return Ok(GenerationResult {
                        text: text.trim().to_string(),
                        total_time_ms: start.elapsed().as_millis() as u64,
                    });
                }
                Err(e) if Self::is_retryable(&e) => {
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Network("Max retries exceeded".to_string())))
    }

    async fn is_available(&self) -> bool {
        let mut builder = self.client.get(self.model_url());
        if let Some(ref key) = self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

// Inference API wire types
#[derive(Debug, Serialize)]
struct GenerateRequest {
    inputs: String,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: usize,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateOutput {
    generated_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = LlmConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_config_from_settings() {
        let settings = LlmSettings::default();
        let config = LlmConfig::from(&settings);
        assert_eq!(config.model, settings.model);
        assert_eq!(config.timeout, Duration::from_secs(settings.timeout_secs));
    }

    #[test]
    fn test_model_url() {
        let backend = InferenceApiBackend::new(LlmConfig::default()).unwrap();
        assert_eq!(
            backend.model_url(),
            "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1"
        );
    }

    #[test]
    fn test_retryable_classification() {
        assert!(InferenceApiBackend::is_retryable(&LlmError::Timeout));
        assert!(InferenceApiBackend::is_retryable(&LlmError::Network(
            "502".into()
        )));
        assert!(!InferenceApiBackend::is_retryable(&LlmError::Api(
            "bad request".into()
        )));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest {
            inputs: "Question: hi\nAnswer:".to_string(),
            parameters: GenerateParameters {
                max_new_tokens: 64,
                temperature: 0.7,
                top_p: 0.9,
                return_full_text: false,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parameters"]["max_new_tokens"], 64);
        assert_eq!(json["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_estimate_tokens() {
        let backend = InferenceApiBackend::new(LlmConfig::default()).unwrap();
        assert_eq!(backend.estimate_tokens("12345678"), 2);
    }
}
