//! Application shell: input capture → generation → editor.

use std::path::Path;
use std::sync::Arc;

use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::deliver::{Deliverer, DeliveryClient};
use crate::editor::{Editor, OpState};
use crate::error::GenerateError;
use crate::generate::GenerationClient;
use crate::http::TransportError;
use crate::image::encode_image_file;

/// Orchestrates the flow from user input to an editable recipe post.
///
/// Every error from encoding, validation, or generation is caught here and
/// surfaced as one user-visible message in the generation state; nothing is
/// silently swallowed.
pub struct App {
    generation: GenerationClient,
    deliverer: Arc<dyn Deliverer>,
    clipboard: Arc<dyn ClipboardSink>,
    editor: Option<Editor>,
    generate_state: OpState,
}

impl App {
    /// Build the shell with production collaborators.
    pub fn new(endpoint_url: &str, webhook_url: &str) -> Result<Self, TransportError> {
        let generation =
            GenerationClient::new(endpoint_url).map_err(|e| TransportError(e.to_string()))?;
        let deliverer =
            DeliveryClient::new(webhook_url).map_err(|e| TransportError(e.to_string()))?;

        Ok(Self::with_parts(
            generation,
            Arc::new(deliverer),
            Arc::new(SystemClipboard),
        ))
    }

    /// Build the shell from explicit collaborators (used by tests).
    pub fn with_parts(
        generation: GenerationClient,
        deliverer: Arc<dyn Deliverer>,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Self {
        Self {
            generation,
            deliverer,
            clipboard,
            editor: None,
            generate_state: OpState::Idle,
        }
    }

    /// Generate a recipe post from text and/or an image file.
    ///
    /// Single-flight: a generation already in progress makes this a no-op.
    /// Any previous result is discarded before the new request is issued.
    pub async fn generate(&mut self, text: &str, image_path: Option<&Path>) {
        if self.generate_state == OpState::InProgress {
            tracing::warn!("generation already in progress, ignoring");
            return;
        }

        self.generate_state = OpState::InProgress;
        self.editor = None;

        let image = match image_path {
            Some(path) => match encode_image_file(path).await {
                Ok(encoded) => Some(encoded),
                Err(e) => {
                    tracing::warn!(error = %e, "image encoding failed");
                    self.generate_state = OpState::Failed(e.to_string());
                    return;
                }
            },
            None => None,
        };

        match self.generation.generate(text, image).await {
            Ok(recipe) => {
                self.editor = Some(Editor::new(
                    recipe,
                    self.deliverer.clone(),
                    self.clipboard.clone(),
                ));
                self.generate_state = OpState::Succeeded;
            }
            Err(e @ GenerateError::Validation) => {
                self.generate_state = OpState::Failed(e.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation failed");
                self.generate_state = OpState::Failed(e.to_string());
            }
        }
    }

    /// Drop the current result and return to the initial state.
    pub fn reset(&mut self) {
        self.editor = None;
        self.generate_state = OpState::Idle;
    }

    pub fn generate_state(&self) -> &OpState {
        &self.generate_state
    }

    /// The user-visible error message, if the last generation failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.generate_state {
            OpState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut Editor> {
        self.editor.as_mut()
    }
}
