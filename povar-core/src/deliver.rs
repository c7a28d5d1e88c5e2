//! Delivery of finished recipe posts to the Make.com automation webhook.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DeliveryError;
use crate::http::{JsonTransport, ReqwestTransport};
use crate::types::Recipe;

/// Webhook the original automation listens on. Callers may override it via
/// [`DeliveryClient::new`].
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://hook.eu2.make.com/jo52w67and9w23pahdk86vdbiaqtzfcd";

/// Trait for posting a finished recipe, enabling a fake in editor tests.
#[async_trait]
pub trait Deliverer: Send + Sync {
    /// Single attempt, no retry. The caller decides whether the user may
    /// retry via the UI.
    async fn deliver(&self, recipe: &Recipe) -> Result<(), DeliveryError>;
}

/// The flattened webhook payload. Field labels are fixed, literal strings
/// the automation scenario maps by name.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub post_content: PostContent,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostContent {
    #[serde(rename = "Номер")]
    pub number: String,
    #[serde(rename = "Заголовок")]
    pub title: String,
    #[serde(rename = "Рецепт")]
    pub recipe: String,
    #[serde(rename = "Совет")]
    pub tip: String,
    #[serde(rename = "ДопИнфа")]
    pub nutrition: String,
    #[serde(rename = "Диеты")]
    pub diets: String,
    #[serde(rename = "Промпт")]
    pub prompt: String,
    #[serde(rename = "Хэштеги")]
    pub hashtags: String,
}

/// Flatten a recipe into the webhook payload: ingredients and steps merge
/// into one multi-line block, hashtags join with single spaces.
pub fn flatten_recipe(recipe: &Recipe) -> WebhookPayload {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|i| format!("- {}", i))
        .collect::<Vec<_>>()
        .join("\n");

    let preparation = recipe
        .preparation
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    WebhookPayload {
        post_content: PostContent {
            number: recipe.recipe_number.clone(),
            title: recipe.title.clone(),
            recipe: format!("Ингредиенты:\n{}\n\nПриготовление:\n{}", ingredients, preparation),
            tip: recipe.tip.clone(),
            nutrition: recipe.nutrition_info.clone(),
            diets: recipe.diet_info.clone(),
            prompt: recipe.image_prompt.clone(),
            hashtags: recipe.hashtags.join(" "),
        },
    }
}

/// Client posting finished posts to the external webhook.
pub struct DeliveryClient {
    webhook_url: String,
    transport: Arc<dyn JsonTransport>,
}

impl DeliveryClient {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, DeliveryError> {
        let transport = ReqwestTransport::new().map_err(|e| DeliveryError(e.to_string()))?;
        Ok(Self::with_transport(webhook_url, Arc::new(transport)))
    }

    pub fn with_transport(
        webhook_url: impl Into<String>,
        transport: Arc<dyn JsonTransport>,
    ) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            transport,
        }
    }
}

#[async_trait]
impl Deliverer for DeliveryClient {
    async fn deliver(&self, recipe: &Recipe) -> Result<(), DeliveryError> {
        let payload = serde_json::to_value(flatten_recipe(recipe))
            .map_err(|e| DeliveryError(e.to_string()))?;

        let response = self
            .transport
            .post_json(&self.webhook_url, &payload)
            .await
            .map_err(|e| DeliveryError(format!("Сетевая ошибка: {}", e)))?;

        // Make.com often answers with plain text ("Accepted."), so the body
        // is never parsed. Any 2xx counts as success.
        if !response.is_success() {
            tracing::warn!(status = response.status, "webhook rejected the post");
            return Err(DeliveryError(format!("Ошибка сервера: {}", response.status)));
        }

        tracing::info!("recipe post delivered to webhook");
        Ok(())
    }
}
