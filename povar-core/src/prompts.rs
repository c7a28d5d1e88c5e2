//! Fixed instruction and prompt template for recipe post generation.
//!
//! Kept in the core crate so the endpoint and any future callers share one
//! definition alongside the schema in [`crate::schema`].

/// System instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert culinary AI specializing in adapting professional dietary recipes for home cooking. Your task is to analyze the user's recipe (from text or image) and convert it into a structured Instagram post format. You must strictly adhere to the provided JSON schema for your output. The tone should be warm, encouraging, and clear for a home cook. Calculate nutritional values based on standard food data for the adapted ingredient quantities.";

/// Fixed user-prompt template describing the required post parts.
pub const PROMPT_TEMPLATE: &str = "Пожалуйста, проанализируй следующий рецепт из общепита. Адаптируй его для домашнего приготовления на 2-4 порции и создай пост для Instagram в формате JSON. Пост должен содержать: номер рецепта, заголовок, список ингредиентов, 3-4 шага приготовления, КБЖУ на 1 порцию в виде одной строки, полезный совет, информацию о диете/показаниях, промпт для генерации визуала (на английском) и хэштеги, включая #ВкусноПростоПолезно и #Диета№N.";

/// Render the user prompt, appending the recipe text after the template
/// header when present.
pub fn render_user_prompt(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.trim().is_empty() => {
            format!("{}\n\nТекст рецепта:\n{}", PROMPT_TEMPLATE, text)
        }
        _ => PROMPT_TEMPLATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_appends_recipe_text_after_header() {
        let prompt = render_user_prompt(Some("Рецепт №5: Куриный суп"));
        assert!(prompt.starts_with(PROMPT_TEMPLATE));
        assert!(prompt.ends_with("Текст рецепта:\nРецепт №5: Куриный суп"));
    }

    #[test]
    fn prompt_without_text_is_the_bare_template() {
        assert_eq!(render_user_prompt(None), PROMPT_TEMPLATE);
        assert_eq!(render_user_prompt(Some("  ")), PROMPT_TEMPLATE);
    }
}
