//! Generative model abstraction for the recipe generation endpoint.
//!
//! One trait covers the single call shape this server makes: submit an
//! instruction, content parts, and a schema constraint; receive the model's
//! JSON-conforming text or a failure.

mod fake;
mod gemini;

pub use fake::FakeModel;
pub use gemini::GeminiModel;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for model calls.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model request failed: {0}")]
    RequestFailed(String),

    #[error("Model API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse model response: {0}")]
    Parse(String),
}

/// One part of the request content: prompt text or an inline image.
#[derive(Debug, Clone)]
pub enum ContentPart {
    Text(String),
    InlineImage { data: String, mime_type: String },
}

/// Trait for generative model providers.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Submit the system instruction, content parts, and an output schema
    /// constraint; return the model's raw text response.
    async fn generate_structured(
        &self,
        system: &str,
        parts: Vec<ContentPart>,
        schema: Value,
    ) -> Result<String, ModelError>;

    fn model_name(&self) -> &str;
}
