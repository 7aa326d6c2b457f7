//! # Calculator Commands
//!
//! Key sequences, named keys, the clear/backspace buttons and copy.
//!
//! ## Display
//! ```text
//! ┌──────────────────┐
//! │ *             16 │   ◄── pending operator on the left
//! └──────────────────┘
//! ```

use tally_core::{Engine, Intent};

use crate::state::{KeyOutcome, Session};

const DISPLAY_WIDTH: usize = 16;

const TIP_OPEN_NOTICE: &str = "Tip panel is open. Press Escape ('key Escape') or 'tip close' first.";

/// Renders the calculator display box.
pub fn render_display(engine: &Engine) -> String {
    let view = engine.view();
    let marker = match view.pending {
        Some(op) => op.to_string(),
        None => " ".to_string(),
    };
    let width = DISPLAY_WIDTH - 2;
    let border = "─".repeat(DISPLAY_WIDTH + 2);
    format!(
        "┌{border}┐\n│ {marker} {text:>width$} │\n└{border}┘",
        text = view.text,
    )
}

/// Applies on-screen button presses in order.
pub fn press_buttons(session: &mut Session, intents: &[Intent]) -> String {
    for &intent in intents {
        if !session.press(intent) {
            return TIP_OPEN_NOTICE.to_string();
        }
    }
    render_display(session.engine())
}

/// Sends one keyboard key.
pub fn press_key(session: &mut Session, key: &str) -> String {
    match session.press_key(key) {
        KeyOutcome::Applied => render_display(session.engine()),
        KeyOutcome::Intercepted if session.tip().is_open() => TIP_OPEN_NOTICE.to_string(),
        KeyOutcome::Intercepted => format!("Tip panel closed.\n{}", render_display(session.engine())),
        KeyOutcome::Unmapped => format!("Key '{key}' does nothing."),
    }
}

/// Copies the display.
pub fn copy(session: &mut Session) -> String {
    if session.copy() {
        format!("Copied {}", session.engine().formatted_display())
    } else {
        "Nothing copied.".to_string()
    }
}
