//! The recipe post schema, defined once and consumed everywhere.
//!
//! The same object is passed to the model as an output constraint
//! (`responseSchema`), applied by the endpoint when post-processing model
//! output, and relied on by the generation client when parsing responses.

use serde_json::{json, Value};

/// Schema constraint for the model's structured output (Gemini dialect).
pub fn recipe_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recipeNumber": {
                "type": "STRING",
                "description": "Номер рецепта, извлеченный из текста (число перед заголовком)."
            },
            "title": {
                "type": "STRING",
                "description": "Название рецепта."
            },
            "ingredients": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Список ингредиентов, адаптированный для домашнего приготовления (на 2-4 порции)."
            },
            "preparation": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Список из 3-4 шагов приготовления."
            },
            "nutritionInfo": {
                "type": "STRING",
                "description": "Рассчитанный КБЖУ на одну порцию в виде одной строки. Например: \"Калорийность - 400 ккал, Б - 30 г, Ж - 20 г, У - 30 г\"."
            },
            "tip": {
                "type": "STRING",
                "description": "Короткий полезный совет или лайфхак по приготовлению."
            },
            "dietInfo": {
                "type": "STRING",
                "description": "Номера диет и/или медицинские показания, к которым относится рецепт (например, \"Диета №5, гастрит\")."
            },
            "imagePrompt": {
                "type": "STRING",
                "description": "Промпт для генерации фото-реалистичного изображения готового блюда. Должен быть на английском языке."
            },
            "hashtags": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Список релевантных хэштегов, включая \"#ВкусноПростоПолезно\" и \"#Диета№N\", где N - номер диеты из рецепта."
            }
        },
        "required": [
            "recipeNumber", "title", "ingredients", "preparation",
            "nutritionInfo", "tip", "dietInfo", "imagePrompt", "hashtags"
        ]
    })
}

/// Flatten a structured `nutrition` sub-object into the single-line
/// `nutritionInfo` string and remove it.
///
/// The schema asks the model for a flat string, but the model sometimes
/// returns `{calories, protein, fat, carbs}` anyway. Both the endpoint and
/// the generation client run this normalization, so either side may see
/// either shape.
pub fn normalize_nutrition(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };

    let Some(nutrition) = obj.get("nutrition").and_then(Value::as_object) else {
        return;
    };

    let field = |key: &str| -> String {
        match nutrition.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    };

    let line = format!(
        "Калорийность - {}, Б - {}, Ж - {}, У - {}",
        field("calories"),
        field("protein"),
        field("fat"),
        field("carbs")
    );

    obj.insert("nutritionInfo".to_string(), Value::String(line));
    obj.remove("nutrition");
}
