//! Editable working copy of a generated recipe post.
//!
//! The editor owns one working [`Recipe`] plus the transient per-operation
//! state for saving and copying. Scalar fields are edited directly; the two
//! list fields and the hashtags are edited as raw text and split back into
//! sequences, so a textarea round-trips exactly.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::clipboard::ClipboardSink;
use crate::deliver::Deliverer;
use crate::types::Recipe;

/// How long a success confirmation stays visible before clearing itself.
pub const CONFIRMATION_TTL: Duration = Duration::from_secs(2);

/// State of one asynchronous editor operation.
///
/// `Succeeded` auto-transitions back to `Idle` after [`CONFIRMATION_TTL`];
/// `Failed` stays until the user explicitly retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpState {
    Idle,
    InProgress,
    Succeeded,
    Failed(String),
}

/// Scalar recipe fields editable as a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    RecipeNumber,
    Title,
    NutritionInfo,
    Tip,
    DietInfo,
    ImagePrompt,
}

/// Sequence fields edited as one multi-line text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Ingredients,
    Preparation,
}

pub struct Editor {
    working: Recipe,
    deliverer: Arc<dyn Deliverer>,
    clipboard: Arc<dyn ClipboardSink>,
    save_state: Arc<Mutex<OpState>>,
    copy_state: Arc<Mutex<OpState>>,
    save_clear: Option<JoinHandle<()>>,
    copy_clear: Option<JoinHandle<()>>,
}

impl Editor {
    pub fn new(
        recipe: Recipe,
        deliverer: Arc<dyn Deliverer>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        Self {
            working: recipe,
            deliverer,
            clipboard,
            save_state: Arc::new(Mutex::new(OpState::Idle)),
            copy_state: Arc::new(Mutex::new(OpState::Idle)),
            save_clear: None,
            copy_clear: None,
        }
    }

    /// The current working copy.
    pub fn recipe(&self) -> &Recipe {
        &self.working
    }

    /// Replace the working copy wholesale when a new generation result
    /// arrives. Prior edits are discarded, transient state resets.
    pub fn replace(&mut self, recipe: Recipe) {
        self.working = recipe;
        self.abort_save_clear();
        self.abort_copy_clear();
        *self.save_state.lock().unwrap() = OpState::Idle;
        *self.copy_state.lock().unwrap() = OpState::Idle;
    }

    pub fn set_field(&mut self, field: ScalarField, value: &str) {
        let slot = match field {
            ScalarField::RecipeNumber => &mut self.working.recipe_number,
            ScalarField::Title => &mut self.working.title,
            ScalarField::NutritionInfo => &mut self.working.nutrition_info,
            ScalarField::Tip => &mut self.working.tip,
            ScalarField::DietInfo => &mut self.working.diet_info,
            ScalarField::ImagePrompt => &mut self.working.image_prompt,
        };
        *slot = value.to_string();
    }

    /// Split raw multi-line text into the list field, one element per line.
    ///
    /// Empty lines are kept, and a trailing newline produces a trailing
    /// empty element, so joining with '\n' reproduces the input exactly.
    pub fn set_list_field(&mut self, field: ListField, raw: &str) {
        let lines: Vec<String> = raw.split('\n').map(str::to_string).collect();
        match field {
            ListField::Ingredients => self.working.ingredients = lines,
            ListField::Preparation => self.working.preparation = lines,
        }
    }

    /// The list field as editable text, one element per line.
    pub fn list_field_text(&self, field: ListField) -> String {
        match field {
            ListField::Ingredients => self.working.ingredients.join("\n"),
            ListField::Preparation => self.working.preparation.join("\n"),
        }
    }

    /// Split raw text on single spaces into hashtags. No deduplication, no
    /// marker validation; double spaces produce empty tokens.
    pub fn set_hashtags(&mut self, raw: &str) {
        self.working.hashtags = raw.split(' ').map(str::to_string).collect();
    }

    /// Hashtags as editable text, space-joined.
    pub fn hashtags_text(&self) -> String {
        self.working.hashtags.join(" ")
    }

    /// Render the working copy for the clipboard. Pure and deterministic.
    pub fn format_for_clipboard(&self) -> String {
        let r = &self.working;

        let ingredients = r
            .ingredients
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n");

        let preparation = r
            .preparation
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Рецепт №{}: {}\n\n🥑 Ингредиенты:\n{}\n\n🍳 Приготовление:\n{}\n\n🩺 Показания: {}\n\n📊 КБЖУ на 1 порцию: {}\n\n💡 Совет:\n{}\n\n📸 Промпт для визуала:\n{}\n\n{}",
            r.recipe_number,
            r.title,
            ingredients,
            preparation,
            r.diet_info,
            r.nutrition_info,
            r.tip,
            r.image_prompt,
            r.hashtags.join(" "),
        )
        .trim()
        .to_string()
    }

    pub fn save_state(&self) -> OpState {
        self.save_state.lock().unwrap().clone()
    }

    pub fn copy_state(&self) -> OpState {
        self.copy_state.lock().unwrap().clone()
    }

    /// Deliver the working copy to the webhook.
    ///
    /// Single-flight: a save already in progress makes this a no-op (the UI
    /// disables the button, this guard backs it up). A pending success
    /// confirmation timer is cancelled so it cannot clear the new outcome.
    pub async fn save(&mut self) {
        if *self.save_state.lock().unwrap() == OpState::InProgress {
            tracing::warn!("save already in progress, ignoring");
            return;
        }

        self.abort_save_clear();
        *self.save_state.lock().unwrap() = OpState::InProgress;

        match self.deliverer.deliver(&self.working).await {
            Ok(()) => {
                *self.save_state.lock().unwrap() = OpState::Succeeded;
                self.save_clear = Some(schedule_clear(self.save_state.clone()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "delivery failed");
                *self.save_state.lock().unwrap() = OpState::Failed(e.to_string());
            }
        }
    }

    /// Write the clipboard rendering to the system clipboard.
    ///
    /// Must be called within a tokio runtime (the confirmation auto-clear is
    /// a spawned task).
    pub fn copy(&mut self) {
        self.abort_copy_clear();

        match self.clipboard.write_text(&self.format_for_clipboard()) {
            Ok(()) => {
                *self.copy_state.lock().unwrap() = OpState::Succeeded;
                self.copy_clear = Some(schedule_clear(self.copy_state.clone()));
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                *self.copy_state.lock().unwrap() = OpState::Failed(e.to_string());
            }
        }
    }

    fn abort_save_clear(&mut self) {
        if let Some(handle) = self.save_clear.take() {
            handle.abort();
        }
    }

    fn abort_copy_clear(&mut self) {
        if let Some(handle) = self.copy_clear.take() {
            handle.abort();
        }
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        self.abort_save_clear();
        self.abort_copy_clear();
    }
}

/// Clear a success confirmation back to idle after [`CONFIRMATION_TTL`],
/// unless the state has changed in the meantime.
fn schedule_clear(state: Arc<Mutex<OpState>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(CONFIRMATION_TTL).await;
        let mut state = state.lock().unwrap();
        if *state == OpState::Succeeded {
            *state = OpState::Idle;
        }
    })
}
