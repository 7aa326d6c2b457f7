//! # Tip Splitter
//!
//! Splits a bill plus tip between a party of people.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Calculator shows 100 ──► Tip button ──► Panel opens, base = "100.00"  │
//! │                                                                         │
//! │  Chips:  [5%] [10%] [15%] [20%]   or   Custom: [ 12.5 ]                │
//! │  People: [-] 3 [+]                     Round to 0.50: [x]              │
//! │                                                                         │
//! │  Per person: 38.33    Tip: 15.00    Total: 115.00                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The base amount is copied from the calculator once, when the panel
//! opens. Edits on either side afterwards do not affect the other.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::engine::Engine;
use crate::entry::parse_leading_number;
use crate::format::to_fixed;
use crate::money::parse_money;
use crate::{MAX_PEOPLE, MAX_TIP_PERCENT, MIN_PEOPLE, MIN_TIP_PERCENT, TIP_PRESETS};

// =============================================================================
// Calculation
// =============================================================================

/// Result of a tip split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TipBreakdown {
    /// Tip on top of the base amount.
    pub tip_amount: f64,
    /// Base plus tip.
    pub total: f64,
    /// Share of the total for each person.
    pub per_person: f64,
}

/// Computes the tip split.
///
/// With `round_to_half`, the per-person share is rounded to the nearest
/// 0.5 and the total and tip are recomputed from it, so the shown total
/// is always `per_person × people`.
///
/// ## Example
/// ```rust
/// use tally_core::tip::compute;
///
/// let exact = compute(100.0, 3, 15.0, false);
/// assert_eq!(exact.total, 115.0);
///
/// let rounded = compute(100.0, 3, 15.0, true);
/// assert_eq!(rounded.per_person, 38.5);
/// assert_eq!(rounded.total, 115.5);
/// assert_eq!(rounded.tip_amount, 15.5);
/// ```
pub fn compute(base_amount: f64, people: u8, tip_percent: f64, round_to_half: bool) -> TipBreakdown {
    let people = f64::from(people.clamp(MIN_PEOPLE, MAX_PEOPLE));
    let tip_amount = base_amount * tip_percent / 100.0;
    let total = base_amount + tip_amount;
    let per_person = total / people;

    if round_to_half {
        let per_person = (per_person * 2.0).round() / 2.0;
        let total = per_person * people;
        TipBreakdown {
            tip_amount: total - base_amount,
            total,
            per_person,
        }
    } else {
        TipBreakdown {
            tip_amount,
            total,
            per_person,
        }
    }
}

impl TipBreakdown {
    /// Tip with two decimals.
    pub fn tip_text(&self) -> String {
        to_fixed(self.tip_amount, 2)
    }

    /// Total with two decimals.
    pub fn total_text(&self) -> String {
        to_fixed(self.total, 2)
    }

    /// Per-person share with two decimals.
    pub fn per_person_text(&self) -> String {
        to_fixed(self.per_person, 2)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Persisted tip configuration.
///
/// ## Invariants
/// - `people` in `[1, 10]`
/// - `tip_percent` in `[0, 50]`
///
/// Every setter clamps, so the invariants hold after any write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TipSettings {
    people: u8,
    tip_percent: f64,
    custom_enabled: bool,
    round_to_half: bool,
}

impl Default for TipSettings {
    fn default() -> Self {
        TipSettings {
            people: 1,
            tip_percent: 10.0,
            custom_enabled: false,
            round_to_half: false,
        }
    }
}

impl TipSettings {
    /// Builds settings, clamping out-of-range values.
    pub fn new(people: i64, tip_percent: f64, custom_enabled: bool, round_to_half: bool) -> Self {
        let mut settings = TipSettings {
            custom_enabled,
            round_to_half,
            ..TipSettings::default()
        };
        settings.set_people(people);
        settings.set_tip_percent(tip_percent);
        settings
    }

    /// Party size.
    pub fn people(&self) -> u8 {
        self.people
    }

    /// Tip percentage.
    pub fn tip_percent(&self) -> f64 {
        self.tip_percent
    }

    /// Whether the percentage came from the custom field.
    pub fn custom_enabled(&self) -> bool {
        self.custom_enabled
    }

    /// Whether per-person shares round to the nearest 0.5.
    pub fn round_to_half(&self) -> bool {
        self.round_to_half
    }

    /// Sets the party size, clamped to `[1, 10]`.
    pub fn set_people(&mut self, people: i64) {
        self.people = people.clamp(i64::from(MIN_PEOPLE), i64::from(MAX_PEOPLE)) as u8;
    }

    /// Stepper buttons: adds `delta` to the party size, clamped.
    pub fn step_people(&mut self, delta: i64) {
        self.set_people(i64::from(self.people).saturating_add(delta));
    }

    /// Sets the percentage, clamped to `[0, 50]`; `NaN` becomes `0`.
    pub fn set_tip_percent(&mut self, percent: f64) {
        self.tip_percent = if percent.is_nan() {
            MIN_TIP_PERCENT
        } else {
            percent.clamp(MIN_TIP_PERCENT, MAX_TIP_PERCENT)
        };
    }

    /// Chip selection: sets the percentage and leaves custom mode.
    pub fn select_preset(&mut self, percent: f64) {
        self.custom_enabled = false;
        self.set_tip_percent(percent);
    }

    /// Custom field: reads the leading number of the text (none → 0) and
    /// enters custom mode. `"12abc3"` reads as 12.
    pub fn set_custom_percent(&mut self, text: &str) {
        self.custom_enabled = true;
        self.set_tip_percent(parse_percent(text));
    }

    /// Toggles rounding to the nearest 0.5.
    pub fn set_round_to_half(&mut self, enabled: bool) {
        self.round_to_half = enabled;
    }

    /// The chip to highlight, if any.
    ///
    /// No chip is highlighted in custom mode, even if the custom value
    /// happens to equal a preset.
    pub fn highlighted_preset(&self) -> Option<u8> {
        if self.custom_enabled {
            return None;
        }
        TIP_PRESETS
            .iter()
            .copied()
            .find(|&preset| f64::from(preset) == self.tip_percent)
    }

    /// Computes the split for `base_amount` with these settings.
    pub fn breakdown(&self, base_amount: f64) -> TipBreakdown {
        compute(base_amount, self.people, self.tip_percent, self.round_to_half)
    }
}

// =============================================================================
// Panel
// =============================================================================

/// The tip panel: settings plus the free-text fields and open state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TipPanel {
    settings: TipSettings,
    base_text: String,
    custom_text: String,
    open: bool,
}

impl TipPanel {
    /// Creates a closed panel with the given settings.
    pub fn new(settings: TipSettings) -> Self {
        TipPanel {
            settings,
            ..TipPanel::default()
        }
    }

    /// Opens the panel, copying the calculator's value into the base field.
    ///
    /// Refused (returns false) while the calculator shows an error.
    pub fn open_from(&mut self, engine: &Engine) -> bool {
        let Some(value) = engine.current_value() else {
            return false;
        };
        let value = if value.is_finite() { value } else { 0.0 };
        self.base_text = to_fixed(value, 2);
        self.open = true;
        true
    }

    /// Closes the panel. Field contents are kept.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the panel is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Routes a keyboard key while the panel may be open.
    ///
    /// Returns true when the panel consumed the key: while open, every key
    /// is swallowed and `Escape` closes the panel.
    pub fn intercept_key(&mut self, key: &str) -> bool {
        if !self.open {
            return false;
        }
        if key == "Escape" {
            self.close();
        }
        true
    }

    /// Replaces the base amount text.
    pub fn set_base_text(&mut self, text: impl Into<String>) {
        self.base_text = text.into();
    }

    /// Base amount text as typed.
    pub fn base_text(&self) -> &str {
        &self.base_text
    }

    /// Parsed base amount (never negative).
    pub fn base_amount(&self) -> f64 {
        parse_money(&self.base_text)
    }

    /// Custom percentage text as typed.
    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    /// Types into the custom percentage field.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
        self.settings.set_custom_percent(&self.custom_text);
    }

    /// Taps a chip; clears the custom field.
    pub fn select_preset(&mut self, percent: f64) {
        self.custom_text.clear();
        self.settings.select_preset(percent);
    }

    /// Current settings.
    pub fn settings(&self) -> &TipSettings {
        &self.settings
    }

    /// Mutable settings (people stepper, rounding toggle).
    pub fn settings_mut(&mut self) -> &mut TipSettings {
        &mut self.settings
    }

    /// Split of the current base amount.
    pub fn breakdown(&self) -> TipBreakdown {
        self.settings.breakdown(self.base_amount())
    }
}

/// Leading decimal number of `text`, `NaN` when it does not start with one.
fn parse_percent(text: &str) -> f64 {
    let text = text.trim_start();
    let numeric = text
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if numeric {
        parse_leading_number(text)
    } else {
        f64::NAN
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
