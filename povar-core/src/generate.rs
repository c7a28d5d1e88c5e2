//! Client for the recipe generation endpoint.
//!
//! The client talks to our own server-side endpoint rather than the model
//! provider directly, so the provider credential never leaves the server.

use std::sync::Arc;

use serde_json::Value;

use crate::error::GenerateError;
use crate::http::{JsonTransport, ReqwestTransport};
use crate::schema::normalize_nutrition;
use crate::types::{EncodedImage, GenerationRequest, Recipe};

/// Client for `POST /api/generate`.
pub struct GenerationClient {
    endpoint_url: String,
    transport: Arc<dyn JsonTransport>,
}

impl GenerationClient {
    /// Create a client for the given endpoint URL with the default transport.
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self, GenerateError> {
        let transport = ReqwestTransport::new().map_err(|e| GenerateError::Network(e.to_string()))?;
        Ok(Self::with_transport(endpoint_url, Arc::new(transport)))
    }

    pub fn with_transport(
        endpoint_url: impl Into<String>,
        transport: Arc<dyn JsonTransport>,
    ) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            transport,
        }
    }

    /// Generate a recipe post from user text and/or an encoded image.
    ///
    /// Refuses to issue a network call when both are absent.
    pub async fn generate(
        &self,
        text: &str,
        image: Option<EncodedImage>,
    ) -> Result<Recipe, GenerateError> {
        if text.trim().is_empty() && image.is_none() {
            return Err(GenerateError::Validation);
        }

        let request = GenerationRequest {
            text: if text.trim().is_empty() {
                None
            } else {
                Some(text.to_string())
            },
            image: image.map(Into::into),
        };

        let body = serde_json::to_value(&request)
            .map_err(|e| GenerateError::Generation(e.to_string()))?;

        tracing::debug!(url = %self.endpoint_url, has_image = request.image.is_some(), "requesting generation");

        let response = self
            .transport
            .post_json(&self.endpoint_url, &body)
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        if !response.is_success() {
            let message = extract_error_message(response.status, &response.body);
            tracing::warn!(status = response.status, %message, "generation failed");
            return Err(GenerateError::Generation(message));
        }

        parse_recipe(&response.body)
    }
}

/// Pull a human-readable message out of an error body, or synthesize one
/// from the status code.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// Parse a success body as a canonical recipe, tolerating a structured
/// `nutrition` sub-object the endpoint may not have flattened.
pub(crate) fn parse_recipe(body: &str) -> Result<Recipe, GenerateError> {
    let mut value: Value = serde_json::from_str(body)
        .map_err(|e| GenerateError::Generation(format!("Invalid recipe JSON: {}", e)))?;

    normalize_nutrition(&mut value);

    serde_json::from_value(value)
        .map_err(|e| GenerateError::Generation(format!("Malformed recipe: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;

    const ENDPOINT: &str = "http://localhost/api/generate";

    fn recipe_json() -> String {
        serde_json::json!({
            "recipeNumber": "5",
            "title": "Куриный суп",
            "ingredients": ["курица", "вода", "соль"],
            "preparation": ["Вскипятить воду", "Добавить курицу", "Варить 40 минут"],
            "nutritionInfo": "Калорийность - 200 ккал, Б - 20 г, Ж - 5 г, У - 10 г",
            "tip": "Добавьте зелень",
            "dietInfo": "Диета №5",
            "imagePrompt": "A bowl of chicken soup...",
            "hashtags": ["#ВкусноПростоПолезно", "#Диета№5"]
        })
        .to_string()
    }

    #[tokio::test]
    async fn empty_input_fails_without_a_network_call() {
        let transport = Arc::new(MockTransport::new());
        let client = GenerationClient::with_transport(ENDPOINT, transport.clone());

        let result = client.generate("", None).await;
        assert!(matches!(result, Err(GenerateError::Validation)));
        assert_eq!(transport.request_count(), 0);

        let result = client.generate("   \n ", None).await;
        assert!(matches!(result, Err(GenerateError::Validation)));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn success_body_parses_into_a_recipe() {
        let transport = Arc::new(MockTransport::new().with_response(ENDPOINT, 200, &recipe_json()));
        let client = GenerationClient::with_transport(ENDPOINT, transport.clone());

        let recipe = client.generate("Рецепт №5: Куриный суп", None).await.unwrap();
        assert_eq!(recipe.title, "Куриный суп");
        assert_eq!(recipe.ingredients.len(), 3);

        // The text went out under the documented wire key.
        let requests = transport.requests();
        assert_eq!(requests[0].1["text"], "Рецепт №5: Куриный суп");
    }

    #[tokio::test]
    async fn structured_nutrition_is_flattened_client_side() {
        let body = serde_json::json!({
            "recipeNumber": "5",
            "title": "Куриный суп",
            "ingredients": ["курица"],
            "preparation": ["Варить"],
            "nutrition": {"calories": "200 ккал", "protein": "20 г", "fat": "5 г", "carbs": "10 г"},
            "tip": "Добавьте зелень",
            "dietInfo": "Диета №5",
            "imagePrompt": "A bowl of soup",
            "hashtags": ["#Диета№5"]
        })
        .to_string();

        let transport = Arc::new(MockTransport::new().with_response(ENDPOINT, 200, &body));
        let client = GenerationClient::with_transport(ENDPOINT, transport);

        let recipe = client.generate("суп", None).await.unwrap();
        assert_eq!(
            recipe.nutrition_info,
            "Калорийность - 200 ккал, Б - 20 г, Ж - 5 г, У - 10 г"
        );
    }

    #[tokio::test]
    async fn error_body_message_passes_through_exactly() {
        let transport = Arc::new(MockTransport::new().with_response(
            ENDPOINT,
            400,
            r#"{"error": "X"}"#,
        ));
        let client = GenerationClient::with_transport(ENDPOINT, transport);

        match client.generate("суп", None).await {
            Err(GenerateError::Generation(message)) => assert_eq!(message, "X"),
            other => panic!("expected Generation error, got {:?}", other.map(|r| r.title)),
        }
    }

    #[tokio::test]
    async fn unparseable_error_body_falls_back_to_status() {
        let transport =
            Arc::new(MockTransport::new().with_response(ENDPOINT, 500, "<html>oops</html>"));
        let client = GenerationClient::with_transport(ENDPOINT, transport);

        match client.generate("суп", None).await {
            Err(GenerateError::Generation(message)) => assert_eq!(message, "HTTP 500"),
            other => panic!("expected Generation error, got {:?}", other.map(|r| r.title)),
        }
    }

    #[tokio::test]
    async fn network_failure_is_a_network_error() {
        let transport =
            Arc::new(MockTransport::new().with_network_error(ENDPOINT, "connection refused"));
        let client = GenerationClient::with_transport(ENDPOINT, transport);

        assert!(matches!(
            client.generate("суп", None).await,
            Err(GenerateError::Network(_))
        ));
    }

    #[test]
    fn extract_error_message_variants() {
        assert_eq!(extract_error_message(400, r#"{"error": "плохой запрос"}"#), "плохой запрос");
        assert_eq!(extract_error_message(502, r#"{"message": "no error key"}"#), "HTTP 502");
        assert_eq!(extract_error_message(500, "not json"), "HTTP 500");
    }
}
