//! Canonical recipe post types shared by the client and the server.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The canonical recipe post: produced by the generation endpoint from
/// unstructured input, edited by the user, delivered to the webhook.
///
/// Held immutable as "source" once returned; the editor works on a clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Free text, usually numeric-looking (the number before the title).
    pub recipe_number: String,
    pub title: String,
    /// One ingredient per entry, in presentation order.
    pub ingredients: Vec<String>,
    /// One step per entry, rendered with 1-based numbering.
    pub preparation: Vec<String>,
    /// Single human-readable line, e.g.
    /// "Калорийность - 400 ккал, Б - 30 г, Ж - 20 г, У - 30 г".
    pub nutrition_info: String,
    pub tip: String,
    /// Diet numbers and/or medical indications, e.g. "Диета №5, гастрит".
    pub diet_info: String,
    /// Prompt for generating a photo of the dish. Always in English,
    /// unlike the rest of the post.
    pub image_prompt: String,
    /// Each token keeps its leading '#'; joined with single spaces.
    pub hashtags: Vec<String>,
}

/// A user-selected image encoded for inline transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Base64-encoded bytes, no data-URI prefix.
    pub data: String,
    /// Declared content type, e.g. "image/jpeg".
    pub media_type: String,
}

/// Wire shape of the image part: `{"inlineData": {"data", "mimeType"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImagePart {
    #[serde(rename = "inlineData")]
    pub inline_data: InlineData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InlineData {
    pub data: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

impl From<EncodedImage> for ImagePart {
    fn from(image: EncodedImage) -> Self {
        Self {
            inline_data: InlineData {
                data: image.data,
                mime_type: image.media_type,
            },
        }
    }
}

/// Request body for the generation endpoint. At least one of `text`/`image`
/// must be present; the endpoint rejects an empty request with 400.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GenerationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePart>,
}
