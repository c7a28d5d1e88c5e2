//! Server configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default bind address.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// API key for the model provider. Never leaves the server.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Base URL for the model provider API.
    pub base_url: String,
    /// Address to listen on.
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: model provider API key. Its absence is a
    ///   startup-time fatal error, not a request-time one.
    ///
    /// Optional:
    /// - `POVAR_MODEL`: model name (default: "gemini-2.5-flash")
    /// - `POVAR_MODEL_BASE_URL`: provider base URL
    /// - `POVAR_BIND`: listen address (default: "0.0.0.0:3000")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let model = env::var("POVAR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("POVAR_MODEL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let bind_addr = env::var("POVAR_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
            bind_addr,
        })
    }
}
