use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use utoipa::OpenApi;

use povar_core::prompts::{render_user_prompt, SYSTEM_INSTRUCTION};
use povar_core::schema::{normalize_nutrition, recipe_schema};
use povar_core::types::{GenerationRequest, Recipe};

use crate::api::ErrorResponse;
use crate::model::ContentPart;
use crate::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate_recipe), components(schemas(GenerationRequest, povar_core::types::ImagePart, povar_core::types::InlineData)))]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Canonical recipe post", body = Recipe),
        (status = 400, description = "Missing body or no text/image provided", body = ErrorResponse),
        (status = 500, description = "Model call or parse failure", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(model): State<AppState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Keep every rejection in the shared {error, details?} shape instead of
    // axum's plain-text defaults.
    let Json(request) = match body {
        Ok(json) => json,
        Err(JsonRejection::MissingJsonContentType(_)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Request body is missing.")),
            )
                .into_response();
        }
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_details(
                    "Invalid request body.",
                    rejection.body_text(),
                )),
            )
                .into_response();
        }
    };

    let text = request.text.as_deref().filter(|t| !t.trim().is_empty());

    if text.is_none() && request.image.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Please provide a recipe text or an image.")),
        )
            .into_response();
    }

    let mut parts = vec![ContentPart::Text(render_user_prompt(text))];
    if let Some(image) = request.image {
        parts.push(ContentPart::InlineImage {
            data: image.inline_data.data,
            mime_type: image.inline_data.mime_type,
        });
    }

    let raw = match model
        .generate_structured(SYSTEM_INSTRUCTION, parts, recipe_schema())
        .await
    {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "model call failed");
            return generation_failed(e.to_string());
        }
    };

    // The schema constraint should make this plain JSON, but the model is
    // not fully trusted: parse, flatten a stray nutrition sub-object, and
    // only then commit to the canonical shape.
    let mut value: Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "model returned non-JSON output");
            return generation_failed(format!("Invalid model output: {}", e));
        }
    };

    normalize_nutrition(&mut value);

    let recipe: Recipe = match serde_json::from_value(value) {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::error!(error = %e, "model output did not match the recipe schema");
            return generation_failed(format!("Malformed recipe: {}", e));
        }
    };

    tracing::info!(title = %recipe.title, "recipe post generated");

    (StatusCode::OK, Json(recipe)).into_response()
}

fn generation_failed(details: String) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::with_details(
            "Не удалось сгенерировать рецепт на сервере.",
            details,
        )),
    )
        .into_response()
}
