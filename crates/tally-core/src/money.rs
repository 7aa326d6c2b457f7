//! # Money Module
//!
//! Currencies, the fixed exchange rate and lenient money text parsing.
//!
//! ## Base Currency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every amount is combined in BGN (the base) and converted out again:   │
//! │                                                                         │
//! │    EUR ── × 1.95583 ──► BGN ── ÷ 1.95583 ──► EUR                       │
//! │    BGN ───────────────► BGN ───────────────► BGN                       │
//! │                                                                         │
//! │  Mixing a EUR price with a split EUR + BGN payment therefore never     │
//! │  needs a cross-rate: both sides meet in BGN.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Leniency
//! Money fields are free text. Malformed input is not an error: it parses
//! to `0` (see [`parse_money`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ParseError;
use crate::format::to_fixed;
use crate::EXCHANGE_RATE;

// =============================================================================
// Currency
// =============================================================================

/// One of the two supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Currency {
    /// Euro.
    #[default]
    Eur,
    /// Bulgarian lev (the base currency).
    Bgn,
}

impl Currency {
    /// The currency all amounts are combined in.
    pub const BASE: Currency = Currency::Bgn;

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Bgn => "BGN",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Bgn => "лв",
        }
    }

    /// The other supported currency.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Currency;
    ///
    /// assert_eq!(Currency::Eur.other(), Currency::Bgn);
    /// assert_eq!(Currency::Bgn.other(), Currency::Eur);
    /// ```
    pub const fn other(&self) -> Currency {
        match self {
            Currency::Eur => Currency::Bgn,
            Currency::Bgn => Currency::Eur,
        }
    }

    /// Converts an amount in this currency to the base currency.
    pub fn to_base(&self, amount: f64) -> f64 {
        match self {
            Currency::Eur => amount * EXCHANGE_RATE,
            Currency::Bgn => amount,
        }
    }

    /// Converts a base-currency amount into this currency.
    pub fn from_base(&self, amount: f64) -> f64 {
        match self {
            Currency::Eur => amount / EXCHANGE_RATE,
            Currency::Bgn => amount,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUR" | "€" => Ok(Currency::Eur),
            "BGN" | "ЛВ" | "LV" => Ok(Currency::Bgn),
            _ => Err(ParseError::UnknownCurrency(s.to_string())),
        }
    }
}

// =============================================================================
// Parsing and Formatting
// =============================================================================

/// Parses free-text money input.
///
/// ## Rules
/// 1. Whitespace is removed and `,` becomes `.`
/// 2. Only digits, the first `.`, and a leading `-` are kept
/// 3. A trailing lone `.` is dropped
/// 4. Non-finite or negative results (and empty text) are `0`
///
/// ## Example
/// ```rust
/// use tally_core::money::parse_money;
///
/// assert_eq!(parse_money("12,50 €"), 12.5);
/// assert_eq!(parse_money("-3"), 0.0);
/// assert_eq!(parse_money("1.2.3"), 1.23);
/// assert_eq!(parse_money("abc"), 0.0);
/// ```
pub fn parse_money(text: &str) -> f64 {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let mut cleaned = String::with_capacity(normalized.len());
    let mut seen_point = false;
    for (i, c) in normalized.chars().enumerate() {
        match c {
            '0'..='9' => cleaned.push(c),
            '.' if !seen_point => {
                seen_point = true;
                cleaned.push('.');
            }
            '-' if i == 0 => cleaned.push('-'),
            _ => {}
        }
    }

    if cleaned.ends_with('.') {
        cleaned.pop();
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value.abs(),
        _ => 0.0,
    }
}

/// Formats an amount with two decimals, no symbol.
pub fn format_amount(amount: f64) -> String {
    to_fixed(amount, 2)
}

/// Formats an amount with the currency symbol in front.
///
/// ## Example
/// ```rust
/// use tally_core::money::{format_currency, Currency};
///
/// assert_eq!(format_currency(10.0, Currency::Eur), "€10.00");
/// assert_eq!(format_currency(3.5, Currency::Bgn), "лв3.50");
/// ```
pub fn format_currency(amount: f64, currency: Currency) -> String {
    format!("{}{}", currency.symbol(), format_amount(amount))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_examples() {
        assert_eq!(parse_money("12,50 €"), 12.5);
        assert_eq!(parse_money("-3"), 0.0);
        assert_eq!(parse_money("1.2.3"), 1.23);
    }

    #[test]
    fn test_parse_money_edge_cases() {
        assert_eq!(parse_money(""), 0.0);
        assert_eq!(parse_money("."), 0.0);
        assert_eq!(parse_money("7."), 7.0);
        assert_eq!(parse_money(" 1 000 "), 1000.0);
        assert_eq!(parse_money("лв 4,2"), 4.2);
        assert_eq!(parse_money("3-4"), 34.0);
        assert_eq!(parse_money("-"), 0.0);
        assert_eq!(parse_money("-0"), 0.0);
    }

    #[test]
    fn test_parse_money_huge_input_is_finite_or_zero() {
        let huge = "9".repeat(400);
        assert_eq!(parse_money(&huge), 0.0);
    }

    #[test]
    fn test_currency_conversion() {
        assert_eq!(Currency::Bgn.to_base(10.0), 10.0);
        assert_eq!(Currency::Eur.to_base(1.0), EXCHANGE_RATE);
        let back = Currency::Eur.from_base(Currency::Eur.to_base(25.0));
        assert!((back - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_currency_parse_and_display() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" BGN ".parse::<Currency>().unwrap(), Currency::Bgn);
        assert_eq!("лв".parse::<Currency>().unwrap(), Currency::Bgn);
        assert!("USD".parse::<Currency>().is_err());
        assert_eq!(Currency::Bgn.to_string(), "BGN");
    }

    #[test]
    fn test_currency_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::Eur).unwrap(), r#""EUR""#);
        let parsed: Currency = serde_json::from_str(r#""BGN""#).unwrap();
        assert_eq!(parsed, Currency::Bgn);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, Currency::Eur), "€0.00");
        assert_eq!(format_currency(1234.567, Currency::Bgn), "лв1234.57");
    }
}
