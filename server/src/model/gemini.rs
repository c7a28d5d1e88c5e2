//! Gemini model provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{ContentPart, GenerativeModel, ModelError};

/// Gemini API provider using the `generateContent` REST endpoint with a
/// response schema constraint.
pub struct GeminiModel {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiModel {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn to_part(part: &ContentPart) -> Value {
        match part {
            ContentPart::Text(text) => json!({ "text": text }),
            ContentPart::InlineImage { data, mime_type } => json!({
                "inlineData": { "mimeType": mime_type, "data": data }
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
    temperature: f32,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Error response from the Gemini API.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiApiError,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    message: String,
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    async fn generate_structured(
        &self,
        system: &str,
        parts: Vec<ContentPart>,
        schema: Value,
    ) -> Result<String, ModelError> {
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system }] },
            "contents": [{ "parts": parts.iter().map(Self::to_part).collect::<Vec<_>>() }],
            "generationConfig": GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature: 0.5,
            },
        });

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        tracing::debug!(model = %self.model, parts = parts.len(), "calling Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        if status != 200 {
            // Try to parse the structured error body
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                return Err(ModelError::Api {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(ModelError::Api {
                status,
                message: body,
            });
        }

        let response: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| ModelError::Parse(e.to_string()))?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| ModelError::Parse("No text content in response".to_string()))?;

        Ok(text.trim().to_string())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_part_uses_inline_data_shape() {
        let part = GeminiModel::to_part(&ContentPart::InlineImage {
            data: "aGVsbG8=".to_string(),
            mime_type: "image/jpeg".to_string(),
        });
        assert_eq!(part["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(part["inlineData"]["data"], "aGVsbG8=");
    }

    #[test]
    fn error_body_parses() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let parsed: GeminiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }

    #[test]
    fn response_body_text_extraction_shape() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "{\"title\": \"Суп\"}"}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(body).unwrap();
        let text = parsed.candidates[0].content.parts[0].text.as_ref().unwrap();
        assert!(text.contains("Суп"));
    }
}
