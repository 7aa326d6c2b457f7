//! # Calculator Engine
//!
//! The keypad state machine shared by every panel.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Engine State Machine                              │
//! │                                                                         │
//! │          digit / backspace                                              │
//! │              ┌────┐                                                     │
//! │              ▼    │        operator                                     │
//! │        ┌──────────┴─┐ ──────────────────► ┌──────────────────┐         │
//! │  ────► │  Entering  │                     │ PendingOperator  │ ◄─┐     │
//! │        └────────────┘ ◄────────────────── └────────┬─────────┘   │     │
//! │              ▲           equals (ok)               │   digit /   │     │
//! │              │                                     │   operator ─┘     │
//! │              │ CE / AC          a / 0              │                   │
//! │        ┌─────┴──────┐ ◄────────────────────────────┘                   │
//! │        │  Errored   │   (every other intent is ignored)                │
//! │        └────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use tally_core::engine::{Engine, EngineState};
//! use tally_core::operator::Operator;
//!
//! let mut engine = Engine::new();
//! engine.input_digit('5');
//! engine.input_operator(Operator::Divide);
//! engine.input_digit('0');
//! engine.equals();
//!
//! assert_eq!(engine.state(), EngineState::Errored);
//! assert_eq!(engine.formatted_display(), "Error");
//!
//! engine.clear_all();
//! assert_eq!(engine.formatted_display(), "0");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::entry::Entry;
use crate::format::to_precision;
use crate::input::Intent;
use crate::operator::{apply, Operator};
use crate::{DISPLAY_SIGNIFICANT_DIGITS, MAX_DISPLAY_CHARS};

/// Text shown while the engine is errored.
pub const ERROR_TEXT: &str = "Error";

/// Coarse state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum EngineState {
    /// Typing a number with no operation pending.
    Entering,
    /// An operator is waiting for its right operand.
    PendingOperator,
    /// A division by zero happened; only CE/AC recover.
    Errored,
}

/// Snapshot handed to the rendering layer after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DisplayView {
    /// Formatted display text.
    pub text: String,
    /// Whether the engine is errored (hosts disable the tip action).
    pub errored: bool,
    /// Pending operator, if any, for an operator indicator.
    pub pending: Option<Operator>,
}

/// The arithmetic input state machine.
///
/// ## Invariants
/// - `errored` implies `accumulator.is_none() && pending.is_none()`
/// - `entry` is a valid number string whenever not errored
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    entry: Entry,
    accumulator: Option<f64>,
    pending: Option<Operator>,
    awaiting_new_entry: bool,
    errored: bool,
}

impl Engine {
    /// Creates an engine showing `"0"`.
    pub fn new() -> Self {
        Engine {
            entry: Entry::new(),
            accumulator: None,
            pending: None,
            awaiting_new_entry: false,
            errored: false,
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Dispatches an intent to the matching operation.
    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Digit(d) => self.input_digit(d),
            Intent::Operator(op) => self.input_operator(op),
            Intent::Equals => self.equals(),
            Intent::Backspace => self.backspace(),
            Intent::ClearEntry => self.clear_entry(),
            Intent::ClearAll => self.clear_all(),
        }
    }

    /// Types a digit or the decimal point.
    ///
    /// Characters other than `0`-`9` and `.` are ignored.
    pub fn input_digit(&mut self, d: char) {
        if self.errored || !(d.is_ascii_digit() || d == '.') {
            return;
        }

        if self.awaiting_new_entry {
            self.entry = Entry::starting_with(d);
            self.awaiting_new_entry = false;
            return;
        }

        if d == '.' {
            self.entry.push_point();
        } else {
            self.entry.push_digit(d);
        }
    }

    /// Presses a binary operator.
    ///
    /// If an operand was typed since the previous operator, the previous
    /// operation is applied first (left-to-right chaining). Pressing two
    /// operators in a row only swaps the pending operator.
    pub fn input_operator(&mut self, op: Operator) {
        if self.errored {
            return;
        }

        let current = self.entry.value();
        match (self.accumulator, self.pending) {
            (None, _) => self.accumulator = Some(current),
            (Some(acc), Some(pending)) if !self.awaiting_new_entry => {
                match apply(pending, acc, current) {
                    Ok(result) => {
                        self.accumulator = Some(result);
                        self.entry = Entry::from_value(result);
                    }
                    Err(_) => {
                        self.enter_error();
                        return;
                    }
                }
            }
            _ => {}
        }

        self.pending = Some(op);
        self.awaiting_new_entry = true;
    }

    /// Evaluates the pending operation.
    pub fn equals(&mut self) {
        if self.errored {
            return;
        }
        let Some(pending) = self.pending else {
            return;
        };

        match apply(pending, self.accumulator.unwrap_or(0.0), self.entry.value()) {
            Ok(result) => {
                self.entry = Entry::from_value(result);
                self.accumulator = None;
                self.pending = None;
                self.awaiting_new_entry = true;
            }
            Err(_) => self.enter_error(),
        }
    }

    /// Removes the last typed character.
    ///
    /// Right after an operator or `=`, the shown result is not editable:
    /// backspace resets the entry to `"0"` instead.
    pub fn backspace(&mut self) {
        if self.errored {
            return;
        }

        if self.awaiting_new_entry {
            self.entry = Entry::new();
            self.awaiting_new_entry = false;
            return;
        }

        self.entry.pop();
    }

    /// Resets the entry, keeping any pending operation. Recovers from Errored.
    pub fn clear_entry(&mut self) {
        self.entry = Entry::new();
        self.awaiting_new_entry = false;
        self.errored = false;
    }

    /// Full reset to the initial state.
    pub fn clear_all(&mut self) {
        *self = Engine::new();
    }

    fn enter_error(&mut self) {
        self.entry = Entry::new();
        self.accumulator = None;
        self.pending = None;
        self.awaiting_new_entry = false;
        self.errored = true;
    }

    // =========================================================================
    // Display Surface
    // =========================================================================

    /// Text for the display.
    ///
    /// - `"Error"` while errored
    /// - entries longer than 12 characters in 8-significant-digit form
    /// - the entry verbatim otherwise
    pub fn formatted_display(&self) -> String {
        if self.errored {
            return ERROR_TEXT.to_string();
        }
        if self.entry.len() > MAX_DISPLAY_CHARS {
            return to_precision(self.entry.value(), DISPLAY_SIGNIFICANT_DIGITS);
        }
        self.entry.to_string()
    }

    /// Whether a division by zero is being shown.
    pub fn is_errored(&self) -> bool {
        self.errored
    }

    /// Numeric value of the entry, `None` while errored.
    pub fn current_value(&self) -> Option<f64> {
        (!self.errored).then(|| self.entry.value())
    }

    /// Coarse state.
    pub fn state(&self) -> EngineState {
        if self.errored {
            EngineState::Errored
        } else if self.pending.is_some() {
            EngineState::PendingOperator
        } else {
            EngineState::Entering
        }
    }

    /// Snapshot for the rendering layer.
    pub fn view(&self) -> DisplayView {
        DisplayView {
            text: self.formatted_display(),
            errored: self.errored,
            pending: self.pending,
        }
    }

    /// Raw entry text.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Stored left operand.
    pub fn accumulator(&self) -> Option<f64> {
        self.accumulator
    }

    /// Pending operator.
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// Whether the next digit starts a new entry.
    pub fn is_awaiting_new_entry(&self) -> bool {
        self.awaiting_new_entry
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(engine: &mut Engine, keys: &str) {
        for intent in Intent::parse_sequence(keys).unwrap() {
            engine.apply_intent(intent);
        }
    }

    fn run(keys: &str) -> Engine {
        let mut engine = Engine::new();
        press(&mut engine, keys);
        engine
    }

    #[test]
    fn test_initial_state() {
        let engine = Engine::new();
        assert_eq!(engine.formatted_display(), "0");
        assert_eq!(engine.state(), EngineState::Entering);
        assert_eq!(engine.current_value(), Some(0.0));
    }

    #[test]
    fn test_typing_concatenates() {
        assert_eq!(run("12.5").formatted_display(), "12.5");
        assert_eq!(run("007").formatted_display(), "7");
        assert_eq!(run("1.0.0").formatted_display(), "1.00");
    }

    #[test]
    fn test_point_on_fresh_state() {
        assert_eq!(run(".").formatted_display(), "0.");
        assert_eq!(run(".5").formatted_display(), "0.5");
    }

    #[test]
    fn test_point_after_operator_starts_fresh() {
        let engine = run("7+.");
        assert_eq!(engine.formatted_display(), "0.");
        assert!(!engine.is_awaiting_new_entry());
    }

    #[test]
    fn test_chained_operators_left_to_right() {
        let mut engine = run("5+3*");
        assert_eq!(engine.accumulator(), Some(8.0));
        assert_eq!(engine.formatted_display(), "8");
        press(&mut engine, "2=");
        assert_eq!(engine.formatted_display(), "16");
        assert_eq!(engine.state(), EngineState::Entering);
    }

    #[test]
    fn test_repeated_operator_only_replaces() {
        let engine = run("9+-*");
        assert_eq!(engine.accumulator(), Some(9.0));
        assert_eq!(engine.pending_operator(), Some(Operator::Multiply));
        assert_eq!(engine.formatted_display(), "9");
    }

    #[test]
    fn test_operator_after_equals_uses_result() {
        let mut engine = run("2+3=");
        assert_eq!(engine.formatted_display(), "5");
        press(&mut engine, "*4=");
        assert_eq!(engine.formatted_display(), "20");
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let mut engine = run("42");
        let before = engine.clone();
        engine.equals();
        assert_eq!(engine, before);
    }

    #[test]
    fn test_equals_uses_shown_value_as_right_operand() {
        // "6 * =" multiplies by the still-shown 6
        assert_eq!(run("6*=").formatted_display(), "36");
    }

    #[test]
    fn test_division_by_zero_on_equals() {
        let mut engine = run("5/0=");
        assert!(engine.is_errored());
        assert_eq!(engine.formatted_display(), "Error");
        assert_eq!(engine.accumulator(), None);
        assert_eq!(engine.pending_operator(), None);
        assert_eq!(engine.current_value(), None);

        press(&mut engine, "7+=");
        assert_eq!(engine.formatted_display(), "Error");
        engine.backspace();
        assert_eq!(engine.formatted_display(), "Error");
    }

    #[test]
    fn test_division_by_zero_on_chained_operator() {
        let engine = run("8/0+");
        assert_eq!(engine.state(), EngineState::Errored);
        assert_eq!(engine.pending_operator(), None);
    }

    #[test]
    fn test_clear_entry_recovers_from_error() {
        let mut engine = run("1/0=");
        engine.clear_entry();
        assert!(!engine.is_errored());
        assert_eq!(engine.formatted_display(), "0");
        press(&mut engine, "3");
        assert_eq!(engine.formatted_display(), "3");
    }

    #[test]
    fn test_clear_entry_keeps_pending_operation() {
        let mut engine = run("10+99");
        engine.clear_entry();
        press(&mut engine, "5=");
        assert_eq!(engine.formatted_display(), "15");
    }

    #[test]
    fn test_clear_all_idempotent() {
        let mut engine = run("12+7");
        engine.clear_all();
        let once = engine.clone();
        engine.clear_all();
        assert_eq!(engine, once);
        assert_eq!(engine, Engine::new());
    }

    #[test]
    fn test_backspace_drops_last_character() {
        let mut engine = run("123");
        engine.backspace();
        assert_eq!(engine.formatted_display(), "12");
        engine.backspace();
        engine.backspace();
        assert_eq!(engine.formatted_display(), "0");
    }

    #[test]
    fn test_backspace_after_result_resets() {
        let mut engine = run("12+3=");
        engine.backspace();
        assert_eq!(engine.formatted_display(), "0");
        assert!(!engine.is_awaiting_new_entry());
        press(&mut engine, "4");
        assert_eq!(engine.formatted_display(), "4");
    }

    #[test]
    fn test_long_entry_uses_significant_digits() {
        assert_eq!(run("123456789012").formatted_display(), "123456789012");
        assert_eq!(run("1234567890123").formatted_display(), "1.2345679e+12");
        assert_eq!(run("0.123456789012").formatted_display(), "0.12345679");
    }

    #[test]
    fn test_long_entry_ties_round_up() {
        assert_eq!(run("12345678.5000").formatted_display(), "12345679");
        assert_eq!(run("1000000050000").formatted_display(), "1.0000001e+12");
    }

    #[test]
    fn test_floating_result_is_shortened() {
        // 0.1 + 0.2 = 0.30000000000000004 (19 chars)
        assert_eq!(run(".1+.2=").formatted_display(), "0.30000000");
    }

    #[test]
    fn test_negative_results() {
        let mut engine = run("3-5=");
        assert_eq!(engine.formatted_display(), "-2");
        press(&mut engine, "*3=");
        assert_eq!(engine.formatted_display(), "-6");
    }

    #[test]
    fn test_ignores_non_digit_characters() {
        let mut engine = Engine::new();
        engine.input_digit('x');
        assert_eq!(engine, Engine::new());
    }

    #[test]
    fn test_view_snapshot() {
        let view = run("4*").view();
        assert_eq!(
            view,
            DisplayView {
                text: "4".to_string(),
                errored: false,
                pending: Some(Operator::Multiply),
            }
        );
    }
}
