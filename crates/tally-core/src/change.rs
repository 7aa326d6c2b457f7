//! # Change / Payment Converter
//!
//! Works out the change due (or the amount still owed) when a price in one
//! currency is paid in the same, the other, or both currencies.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price:  [ 10.00 ] (EUR|BGN)                                            │
//! │  Paid:   [ 20.00 ] (EUR|BGN)      ◄── follows the calculator until      │
//! │                                        edited by hand ("sync" resumes)  │
//! │  Split:  [x]  Also paid: [ 5 ] (the other currency, automatically)     │
//! │  Show in: (EUR|BGN)                                                     │
//! │                                                                         │
//! │  Change: €12.56        Price €10.00   Paid €22.56                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::engine::Engine;
use crate::format::to_fixed;
use crate::money::{format_currency, parse_money, Currency};

// =============================================================================
// Settings
// =============================================================================

/// Persisted currency selections.
///
/// The secondary payment currency is not stored: it is always the
/// complement of `paid_currency` (see [`ChangeSettings::secondary_currency`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChangeSettings {
    /// Currency the price is given in.
    pub price_currency: Currency,
    /// Currency of the primary payment.
    pub paid_currency: Currency,
    /// Currency results are shown in.
    pub output_currency: Currency,
    /// Whether a second payment in the other currency is included.
    pub split_enabled: bool,
}

impl ChangeSettings {
    /// Currency of the secondary (split) payment.
    pub fn secondary_currency(&self) -> Currency {
        self.paid_currency.other()
    }
}

// =============================================================================
// Calculation
// =============================================================================

/// Whether money goes back to the customer or is still owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ChangeLabel {
    /// Paid at least the price.
    Change,
    /// Paid less than the price.
    Remaining,
}

impl fmt::Display for ChangeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeLabel::Change => write!(f, "Change"),
            ChangeLabel::Remaining => write!(f, "Remaining"),
        }
    }
}

/// Amounts entered on the change panel, already parsed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChangeInputs {
    /// Price, in the price currency.
    pub price: f64,
    /// Primary payment, in the paid currency.
    pub paid_primary: f64,
    /// Secondary payment, in the complement of the paid currency.
    pub paid_secondary: f64,
}

/// Result of a change computation, in the output currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChangeBreakdown {
    /// Change or Remaining.
    pub label: ChangeLabel,
    /// Non-negative amount for the label.
    pub amount: f64,
    /// Everything paid.
    pub paid_total: f64,
    /// The price.
    pub price_total: f64,
    /// Currency of the three amounts.
    pub currency: Currency,
}

impl ChangeBreakdown {
    /// `€10.00` style amount.
    pub fn amount_text(&self) -> String {
        format_currency(self.amount, self.currency)
    }

    /// Paid total with symbol.
    pub fn paid_text(&self) -> String {
        format_currency(self.paid_total, self.currency)
    }

    /// Price with symbol.
    pub fn price_text(&self) -> String {
        format_currency(self.price_total, self.currency)
    }
}

/// Computes change due or amount remaining.
///
/// All amounts are combined in the base currency, then converted to the
/// output currency.
///
/// ## Example
/// ```rust
/// use tally_core::change::{compute, ChangeInputs, ChangeLabel, ChangeSettings};
///
/// let inputs = ChangeInputs { price: 10.0, paid_primary: 20.0, paid_secondary: 0.0 };
/// let result = compute(inputs, ChangeSettings::default());
///
/// assert_eq!(result.label, ChangeLabel::Change);
/// assert_eq!(result.amount_text(), "€10.00");
/// ```
pub fn compute(inputs: ChangeInputs, settings: ChangeSettings) -> ChangeBreakdown {
    let price_base = settings.price_currency.to_base(inputs.price);
    let primary_base = settings.paid_currency.to_base(inputs.paid_primary);
    let secondary_base = if settings.split_enabled {
        settings.secondary_currency().to_base(inputs.paid_secondary)
    } else {
        0.0
    };
    let paid_base = primary_base + secondary_base;

    let delta = paid_base - price_base;
    let (label, amount_base) = if delta >= 0.0 {
        (ChangeLabel::Change, delta)
    } else {
        (ChangeLabel::Remaining, delta.abs())
    };

    let output = settings.output_currency;
    ChangeBreakdown {
        label,
        amount: output.from_base(amount_base),
        paid_total: output.from_base(paid_base),
        price_total: output.from_base(price_base),
        currency: output,
    }
}

// =============================================================================
// Panel
// =============================================================================

/// The change panel: settings, free-text fields and the paid lock.
///
/// ## Paid Lock
/// ```text
/// calculator changes ──► paid field mirrors it     (unlocked)
/// user edits paid    ──► lock; calculator ignored  (locked)
/// "sync"             ──► unlock and mirror now
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangePanel {
    settings: ChangeSettings,
    price_text: String,
    paid_text: String,
    paid_secondary_text: String,
    paid_locked: bool,
}

impl ChangePanel {
    /// Creates a panel with the given settings and empty fields.
    pub fn new(settings: ChangeSettings) -> Self {
        ChangePanel {
            settings,
            ..ChangePanel::default()
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &ChangeSettings {
        &self.settings
    }

    /// Sets the price currency.
    pub fn set_price_currency(&mut self, currency: Currency) {
        self.settings.price_currency = currency;
    }

    /// Sets the primary paid currency; the secondary follows.
    pub fn set_paid_currency(&mut self, currency: Currency) {
        self.settings.paid_currency = currency;
    }

    /// Sets the output currency.
    pub fn set_output_currency(&mut self, currency: Currency) {
        self.settings.output_currency = currency;
    }

    /// Turns the split payment on or off.
    pub fn set_split_enabled(&mut self, enabled: bool) {
        self.settings.split_enabled = enabled;
    }

    /// Flips the split payment toggle.
    pub fn toggle_split(&mut self) {
        self.settings.split_enabled = !self.settings.split_enabled;
    }

    /// Types into the price field.
    pub fn set_price_text(&mut self, text: impl Into<String>) {
        self.price_text = text.into();
    }

    /// Types into the paid field by hand, locking it against the calculator.
    pub fn set_paid_text(&mut self, text: impl Into<String>) {
        self.paid_text = text.into();
        self.paid_locked = true;
    }

    /// Types into the secondary paid field.
    pub fn set_paid_secondary_text(&mut self, text: impl Into<String>) {
        self.paid_secondary_text = text.into();
    }

    /// Whether the paid field ignores the calculator.
    pub fn is_paid_locked(&self) -> bool {
        self.paid_locked
    }

    /// Mirrors the calculator's value into the paid field.
    ///
    /// Does nothing while locked or while the calculator is errored.
    /// Returns true if the field was updated.
    pub fn follow_calculator(&mut self, engine: &Engine) -> bool {
        if self.paid_locked {
            return false;
        }
        let Some(value) = engine.current_value() else {
            return false;
        };
        let value = if value.is_finite() { value } else { 0.0 };
        self.paid_text = to_fixed(value, 2);
        true
    }

    /// The "sync" button: unlocks the paid field and mirrors immediately.
    pub fn resync(&mut self, engine: &Engine) -> bool {
        self.paid_locked = false;
        self.follow_calculator(engine)
    }

    /// Price field text.
    pub fn price_text(&self) -> &str {
        &self.price_text
    }

    /// Paid field text.
    pub fn paid_text(&self) -> &str {
        &self.paid_text
    }

    /// Secondary paid field text.
    pub fn paid_secondary_text(&self) -> &str {
        &self.paid_secondary_text
    }

    /// Parsed field values.
    pub fn inputs(&self) -> ChangeInputs {
        ChangeInputs {
            price: parse_money(&self.price_text),
            paid_primary: parse_money(&self.paid_text),
            paid_secondary: parse_money(&self.paid_secondary_text),
        }
    }

    /// Result for the current fields and settings.
    pub fn breakdown(&self) -> ChangeBreakdown {
        compute(self.inputs(), self.settings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXCHANGE_RATE;

    fn settings(price: Currency, paid: Currency, output: Currency, split: bool) -> ChangeSettings {
        ChangeSettings {
            price_currency: price,
            paid_currency: paid,
            output_currency: output,
            split_enabled: split,
        }
    }

    fn inputs(price: f64, paid_primary: f64, paid_secondary: f64) -> ChangeInputs {
        ChangeInputs {
            price,
            paid_primary,
            paid_secondary,
        }
    }

    #[test]
    fn test_same_currency_change() {
        let result = compute(
            inputs(10.0, 20.0, 0.0),
            settings(Currency::Eur, Currency::Eur, Currency::Eur, false),
        );
        assert_eq!(result.label, ChangeLabel::Change);
        assert_eq!(to_fixed(result.amount, 2), "10.00");
        assert_eq!(result.price_text(), "€10.00");
        assert_eq!(result.paid_text(), "€20.00");
    }

    #[test]
    fn test_remaining_is_positive() {
        let result = compute(
            inputs(30.0, 20.0, 0.0),
            settings(Currency::Bgn, Currency::Bgn, Currency::Bgn, false),
        );
        assert_eq!(result.label, ChangeLabel::Remaining);
        assert_eq!(result.amount, 10.0);
        assert_eq!(result.amount_text(), "лв10.00");
    }

    #[test]
    fn test_exact_payment_is_change_of_zero() {
        let result = compute(
            inputs(5.0, 5.0, 0.0),
            settings(Currency::Bgn, Currency::Bgn, Currency::Bgn, false),
        );
        assert_eq!(result.label, ChangeLabel::Change);
        assert_eq!(result.amount, 0.0);
    }

    #[test]
    fn test_cross_currency_payment() {
        // 10 EUR price paid with 20 BGN, shown in BGN
        let result = compute(
            inputs(10.0, 20.0, 0.0),
            settings(Currency::Eur, Currency::Bgn, Currency::Bgn, false),
        );
        assert_eq!(result.label, ChangeLabel::Change);
        assert_eq!(result.amount_text(), "лв0.44");
        assert_eq!(result.price_total, 10.0 * EXCHANGE_RATE);
    }

    #[test]
    fn test_secondary_ignored_without_split() {
        let without = compute(
            inputs(10.0, 5.0, 100.0),
            settings(Currency::Eur, Currency::Eur, Currency::Eur, false),
        );
        assert_eq!(without.label, ChangeLabel::Remaining);
        assert_eq!(without.amount_text(), "€5.00");
    }

    #[test]
    fn test_split_payment_uses_other_currency() {
        // 10 EUR paid with 5 EUR + 19.5583 BGN (= 10 EUR) → 5 EUR change
        let result = compute(
            inputs(10.0, 5.0, 19.5583),
            settings(Currency::Eur, Currency::Eur, Currency::Eur, true),
        );
        assert_eq!(result.label, ChangeLabel::Change);
        assert_eq!(result.amount_text(), "€5.00");
        assert_eq!(result.paid_text(), "€15.00");
    }

    #[test]
    fn test_secondary_currency_is_complement() {
        let mut panel = ChangePanel::default();
        assert_eq!(panel.settings().secondary_currency(), Currency::Bgn);
        panel.set_paid_currency(Currency::Bgn);
        assert_eq!(panel.settings().secondary_currency(), Currency::Eur);
    }

    #[test]
    fn test_panel_parses_free_text() {
        let mut panel = ChangePanel::default();
        panel.set_price_text("9,99 €");
        panel.set_paid_text("abc");
        let result = panel.breakdown();
        assert_eq!(result.label, ChangeLabel::Remaining);
        assert_eq!(result.amount_text(), "€9.99");
    }

    #[test]
    fn test_paid_follows_calculator_until_locked() {
        let mut engine = Engine::new();
        engine.input_digit('4');
        engine.input_digit('2');

        let mut panel = ChangePanel::default();
        assert!(panel.follow_calculator(&engine));
        assert_eq!(panel.paid_text(), "42.00");

        panel.set_paid_text("50");
        engine.input_digit('0');
        assert!(!panel.follow_calculator(&engine));
        assert_eq!(panel.paid_text(), "50");

        assert!(panel.resync(&engine));
        assert!(!panel.is_paid_locked());
        assert_eq!(panel.paid_text(), "420.00");
    }

    #[test]
    fn test_paid_untouched_by_errored_calculator() {
        let mut engine = Engine::new();
        engine.input_digit('7');
        let mut panel = ChangePanel::default();
        panel.follow_calculator(&engine);

        engine.input_operator(crate::operator::Operator::Divide);
        engine.input_digit('0');
        engine.equals();
        assert!(!panel.follow_calculator(&engine));
        assert_eq!(panel.paid_text(), "7.00");
    }

    #[test]
    fn test_toggle_split() {
        let mut panel = ChangePanel::default();
        panel.toggle_split();
        assert!(panel.settings().split_enabled);
        panel.toggle_split();
        assert!(!panel.settings().split_enabled);
    }
}
