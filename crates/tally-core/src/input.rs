//! # Input Intents
//!
//! The only ways a host may mutate the engine.
//!
//! ## Keyboard Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Key (DOM `KeyboardEvent.key`)     Intent                               │
//! │  ─────────────────────────────     ──────────────────────────           │
//! │  "0".."9", "."                     Digit                                │
//! │  "+", "-", "*", "/"                Operator                             │
//! │  "Enter", "="                      Equals                               │
//! │  "Backspace"                       Backspace                            │
//! │  "Escape"                          ClearAll                             │
//! │                                                                         │
//! │  ClearEntry has no key; it is the on-screen "C" button only.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::operator::Operator;

/// A discrete keypad intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Intent {
    /// A digit `0`-`9` or the decimal point `.`.
    Digit(char),
    /// A binary operator.
    Operator(Operator),
    /// `=`
    Equals,
    /// Remove the last typed character.
    Backspace,
    /// Reset the entry, keep the pending operation.
    ClearEntry,
    /// Reset everything.
    ClearAll,
}

impl Intent {
    /// Maps a keyboard key name to an intent.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::input::Intent;
    /// use tally_core::operator::Operator;
    ///
    /// assert_eq!(Intent::from_key("7"), Some(Intent::Digit('7')));
    /// assert_eq!(Intent::from_key("*"), Some(Intent::Operator(Operator::Multiply)));
    /// assert_eq!(Intent::from_key("Enter"), Some(Intent::Equals));
    /// assert_eq!(Intent::from_key("Tab"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Intent> {
        match key {
            "Enter" | "=" => return Some(Intent::Equals),
            "Backspace" => return Some(Intent::Backspace),
            "Escape" => return Some(Intent::ClearAll),
            _ => {}
        }

        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        Intent::from_char(c)
    }

    /// Maps a single keypad character to an intent.
    pub fn from_char(c: char) -> Option<Intent> {
        if c.is_ascii_digit() || c == '.' {
            return Some(Intent::Digit(c));
        }
        if c == '=' {
            return Some(Intent::Equals);
        }
        Operator::from_symbol(c).map(Intent::Operator)
    }

    /// Expands a typed key sequence such as `"12+3="` into intents.
    ///
    /// Whitespace is skipped; any other unknown character fails the
    /// whole sequence.
    pub fn parse_sequence(sequence: &str) -> Result<Vec<Intent>, ParseError> {
        sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Intent::from_char(c).ok_or_else(|| ParseError::UnknownKey(c.to_string())))
            .collect()
    }
}

impl FromStr for Intent {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::from_key(s).ok_or_else(|| ParseError::UnknownKey(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
