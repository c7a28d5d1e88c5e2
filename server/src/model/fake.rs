//! Fake model provider for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing
//! endpoint tests to run without network access or API costs.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use super::{ContentPart, GenerativeModel, ModelError};

/// A fake model for testing.
///
/// Responses are matched by checking if the combined prompt text contains a
/// registered substring. If no match is found, returns the default response
/// or an error.
#[derive(Debug)]
pub struct FakeModel {
    responses: RwLock<HashMap<String, String>>,
    default_response: Option<String>,
}

#[allow(dead_code)]
impl FakeModel {
    /// Create a FakeModel with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
        }
    }

    /// Create a FakeModel that returns `response` for prompts containing a
    /// substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider
            .responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
        provider
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }
}

impl Default for FakeModel {
    fn default() -> Self {
        Self::new().with_default_response("{}")
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate_structured(
        &self,
        _system: &str,
        parts: Vec<ContentPart>,
        _schema: Value,
    ) -> Result<String, ModelError> {
        let prompt: String = parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::InlineImage { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt_lower = prompt.to_lowercase();
        let responses = self.responses.read().unwrap();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(ModelError::RequestFailed(
                "FakeModel: no response configured for prompt".to_string(),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
