//! # Entry
//!
//! The number currently being typed, kept as text.
//!
//! ## Why Text?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Typing "3", ".", "0" must show "3.0" on the display.                  │
//! │                                                                         │
//! │  As f64:   3 → 3 → 3        ❌ decimal point and zero are lost         │
//! │  As text:  "3" → "3." → "3.0"  ✅ exactly what was typed               │
//! │                                                                         │
//! │  Arithmetic parses the text only when an operator or "=" needs it.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Entry` owns the typing rules (leading zero replacement, one decimal
//! point, backspace fallback) and the parse back to `f64`. Display
//! shortening lives in [`crate::format`].

use std::fmt;

use crate::format::stringify_number;

/// Textual decimal number being typed or shown.
///
/// ## Invariants
/// - Never empty; the reset value is `"0"`
/// - At most one `.` when built from keystrokes
/// - Never a bare `"-"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry(String);

impl Entry {
    /// The reset entry, `"0"`.
    pub fn new() -> Self {
        Entry("0".to_string())
    }

    /// Entry for a computed result.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::entry::Entry;
    ///
    /// assert_eq!(Entry::from_value(8.0).as_str(), "8");
    /// assert_eq!(Entry::from_value(0.1 + 0.2).as_str(), "0.30000000000000004");
    /// ```
    pub fn from_value(value: f64) -> Self {
        Entry(stringify_number(value))
    }

    /// Entry started by a fresh keystroke: `"0."` for the decimal point,
    /// the digit itself otherwise.
    pub fn starting_with(key: char) -> Self {
        if key == '.' {
            Entry("0.".to_string())
        } else {
            Entry(key.to_string())
        }
    }

    /// Returns the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Always false; an entry holds at least `"0"`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the entry already has a decimal point.
    pub fn has_point(&self) -> bool {
        self.0.contains('.')
    }

    /// Appends a digit, replacing a lone `"0"`.
    pub fn push_digit(&mut self, digit: char) {
        debug_assert!(digit.is_ascii_digit());
        if self.0 == "0" {
            self.0.clear();
        }
        self.0.push(digit);
    }

    /// Appends a decimal point. Returns false if one is already present.
    pub fn push_point(&mut self) -> bool {
        if self.has_point() {
            return false;
        }
        self.0.push('.');
        true
    }

    /// Drops the last character, falling back to `"0"`.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::entry::Entry;
    ///
    /// let mut entry = Entry::from_value(-7.0);
    /// entry.pop();
    /// assert_eq!(entry.as_str(), "0"); // not a bare "-"
    /// ```
    pub fn pop(&mut self) {
        self.0.pop();
        if self.0.is_empty() || self.0 == "-" {
            self.0 = "0".to_string();
        }
    }

    /// Parses the entry.
    ///
    /// Reads the longest numeric prefix, so a partially typed number
    /// such as `"3."` or a trimmed exponent such as `"1e+"` still has a
    /// value.
    pub fn value(&self) -> f64 {
        parse_leading_number(&self.0)
    }
}

impl Default for Entry {
    fn default() -> Self {
        Entry::new()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses the longest prefix of `text` that is a number, `NaN` if none is.
pub(crate) fn parse_leading_number(text: &str) -> f64 {
    if let Ok(value) = text.parse::<f64>() {
        return value;
    }
    (1..text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// =============================================================================
// Unit Tests
// =============================================================================
