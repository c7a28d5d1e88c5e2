//! End-to-end flow: text in, generated post edited, delivered to the webhook.

use std::sync::Arc;

use povar_core::{
    App, DeliveryClient, FakeClipboard, GenerationClient, MockTransport, OpState,
};

const ENDPOINT: &str = "http://localhost:3000/api/generate";
const WEBHOOK: &str = "https://hook.example/webhook";

fn chicken_soup_body() -> String {
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

fn app_with(transport: Arc<MockTransport>) -> App {
    let generation = GenerationClient::with_transport(ENDPOINT, transport.clone());
    let delivery = DeliveryClient::with_transport(WEBHOOK, transport);
    App::with_parts(generation, Arc::new(delivery), Arc::new(FakeClipboard::new()))
}

#[tokio::test]
async fn generate_edit_and_deliver() {
    let transport = Arc::new(
        MockTransport::new()
            .with_response(ENDPOINT, 200, &chicken_soup_body())
            .with_response(WEBHOOK, 200, "Accepted."),
    );
    let mut app = app_with(transport.clone());

    app.generate("Рецепт №5: Куриный суп ...", None).await;
    assert_eq!(*app.generate_state(), OpState::Succeeded);

    let editor = app.editor().expect("editor populated after generation");

    // All nine fields arrived populated.
    let recipe = editor.recipe();
    assert_eq!(recipe.recipe_number, "5");
    assert_eq!(recipe.title, "Куриный суп");
    assert_eq!(recipe.ingredients, vec!["курица", "вода", "соль"]);
    assert_eq!(recipe.preparation.len(), 3);
    assert!(!recipe.nutrition_info.is_empty());
    assert!(!recipe.tip.is_empty());
    assert!(!recipe.diet_info.is_empty());
    assert!(!recipe.image_prompt.is_empty());
    assert_eq!(recipe.hashtags.len(), 2);

    assert!(editor
        .format_for_clipboard()
        .starts_with("Рецепт №5: Куриный суп"));

    app.editor_mut().unwrap().save().await;
    assert_eq!(app.editor().unwrap().save_state(), OpState::Succeeded);

    // The webhook received the flattened payload with the exact recipe block.
    let requests = transport.requests();
    let (url, payload) = requests.last().unwrap();
    assert_eq!(url, WEBHOOK);
    assert_eq!(
        payload["post_content"]["Рецепт"],
        "Ингредиенты:\n- курица\n- вода\n- соль\n\nПриготовление:\n1. Вскипятить воду\n2. Добавить курицу\n3. Варить 40 минут"
    );
    assert_eq!(payload["post_content"]["Хэштеги"], "#ВкусноПростоПолезно #Диета№5");
}

#[tokio::test]
async fn generation_failure_surfaces_one_message() {
    let transport = Arc::new(MockTransport::new().with_response(
        ENDPOINT,
        500,
        r#"{"error": "Не удалось сгенерировать рецепт на сервере."}"#,
    ));
    let mut app = app_with(transport);

    app.generate("борщ", None).await;

    assert!(app.editor().is_none());
    assert_eq!(
        app.error_message(),
        Some("Не удалось сгенерировать рецепт на сервере.")
    );
}

#[tokio::test]
async fn empty_input_never_reaches_the_network() {
    let transport = Arc::new(MockTransport::new());
    let mut app = app_with(transport.clone());

    app.generate("", None).await;

    assert!(matches!(app.generate_state(), OpState::Failed(_)));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn new_generation_discards_previous_result() {
    let transport = Arc::new(
        MockTransport::new().with_response(ENDPOINT, 200, &chicken_soup_body()),
    );
    let mut app = app_with(transport.clone());

    app.generate("суп", None).await;
    assert!(app.editor().is_some());

    // Second run fails at validation; the old editor must already be gone.
    app.generate("", None).await;
    assert!(app.editor().is_none());
}
