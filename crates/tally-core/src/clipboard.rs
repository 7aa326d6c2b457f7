//! # Clipboard Contract
//!
//! Decides what the copy action may copy. The actual clipboard lives
//! outside the core behind [`Clipboard`].

/// System clipboard collaborator.
pub trait Clipboard {
    /// Copies plain text. Returns false if the clipboard refused it.
    fn copy_text(&mut self, text: &str) -> bool;
}

/// Text to copy for a display, or `None` if the display is not copyable.
///
/// Only non-zero numbers are copyable: `"0"`, `"0."`, empty text and
/// `"Error"` yield `None`.
///
/// ## Example
/// ```rust
/// use tally_core::clipboard::copyable_text;
///
/// assert_eq!(copyable_text("12.5"), Some("12.5".to_string()));
/// assert_eq!(copyable_text("0"), None);
/// assert_eq!(copyable_text("Error"), None);
/// ```
pub fn copyable_text(display: &str) -> Option<String> {
    let text = display.trim();
    let value: f64 = text.parse().ok()?;
    (value.is_finite() && value != 0.0).then(|| text.to_string())
}

/// Copies the display through `clipboard` if it is copyable.
///
/// Returns true only when something was copied.
pub fn copy_display(display: &str, clipboard: &mut dyn Clipboard) -> bool {
    match copyable_text(display) {
        Some(text) => clipboard.copy_text(&text),
        None => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
