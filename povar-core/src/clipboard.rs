//! Clipboard seam for the editor.

use std::sync::Mutex;

use crate::error::ClipboardError;

/// Trait for clipboard writes, enabling a recording fake in tests.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard backed by arboard.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

/// Recording clipboard for tests.
#[derive(Default)]
pub struct FakeClipboard {
    written: Mutex<Vec<String>>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, in order.
    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardSink for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
