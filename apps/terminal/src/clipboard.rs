//! System clipboard for the copy action.

use tally_core::Clipboard;
use tracing::{debug, warn};

/// Clipboard backed by `arboard`.
///
/// The handle is opened on first use and kept for the session; on X11 the
/// copied text only stays available while the handle lives.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => arboard::Clipboard::new()
                .map_err(|e| format!("Failed to access clipboard: {}", e))?,
        };

        self.handle
            .insert(handle)
            .set_text(text.to_string())
            .map_err(|e| format!("Failed to copy to clipboard: {}", e))
    }
}

impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> bool {
        match self.set_text(text) {
            Ok(()) => {
                debug!(chars = text.chars().count(), "Copied display to clipboard");
                true
            }
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable");
                false
            }
        }
    }
}

/// Clipboard that refuses everything (`--no-clipboard`).
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClipboard;

impl Clipboard for DisabledClipboard {
    fn copy_text(&mut self, _text: &str) -> bool {
        debug!("Clipboard disabled, copy skipped");
        false
    }
}
