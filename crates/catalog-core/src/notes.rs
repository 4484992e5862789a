use crate::constants::NOTES_STORAGE_KEY;
use crate::storage::Storage;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// The global freeform notes panel.
///
/// Edits are written to storage once `save_delay` has passed since the last
/// keystroke, or immediately through [`NotesPad::flush`].
pub struct NotesPad {
    text: String,
    dirty_since: Option<Instant>,
    save_delay: Duration,
    storage: Arc<dyn Storage>,
}

impl NotesPad {
    pub fn load(storage: Arc<dyn Storage>, save_delay: Duration) -> Self {
        let text = match storage.get(NOTES_STORAGE_KEY) {
            Ok(text) => text.unwrap_or_default(),
            Err(e) => {
                log::warn!("Failed to read notes: {}", e);
                String::new()
            }
        };

        Self {
            text,
            dirty_since: None,
            save_delay,
            storage,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.dirty_since = Some(now);
    }

    /// Persist if the debounce delay has elapsed. Returns true if written.
    pub fn flush_if_due(&mut self, now: Instant) -> bool {
        match self.dirty_since {
            Some(since) if now.saturating_duration_since(since) >= self.save_delay => {
                self.flush();
                true
            }
            _ => false,
        }
    }

    pub fn flush(&mut self) {
        if self.dirty_since.take().is_none() {
            return;
        }
        if let Err(e) = self.storage.set(NOTES_STORAGE_KEY, &self.text) {
            log::warn!("Failed to save notes: {}", e);
        }
    }
}
