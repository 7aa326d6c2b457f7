//! # Error Types
//!
//! Error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── DivisionByZero   - The one arithmetic failure (domain error)      │
//! │  └── ParseError       - Text that does not name a currency/key/op      │
//! │                                                                         │
//! │  tally-prefs errors (separate crate)                                   │
//! │  └── PrefsError       - Store I/O and JSON failures (never escapes     │
//! │                         the PreferenceStore impls)                     │
//! │                                                                         │
//! │  terminal errors (in app)                                              │
//! │  └── AppError         - Config and command line failures               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Domain Errors Never Cross the Engine
//! `DivisionByZero` is returned by [`crate::operator::apply`] but the
//! engine turns it into its Errored state. Callers of the engine see
//! `"Error"` on the display, not a `Result`.

use thiserror::Error;

// =============================================================================
// Domain Error
// =============================================================================

/// Division where the right operand is zero.
///
/// ## User Workflow
/// ```text
/// 5  /  0  =
///           │
///           ▼
/// apply(Divide, 5, 0) → Err(DivisionByZero)
///           │
///           ▼
/// Engine enters Errored, display shows "Error"
///           │
///           ▼
/// Only CE / AC are accepted until then
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Division by zero")]
pub struct DivisionByZero;

// =============================================================================
// Parse Error
// =============================================================================

/// Text that could not be decoded into one of the core's enums.
///
/// Used by the `FromStr` impls that hosts call when translating
/// configuration values or command words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unknown currency code.
    #[error("Unknown currency '{0}'. Valid options: EUR, BGN")]
    UnknownCurrency(String),

    /// Unknown operator symbol.
    #[error("Unknown operator '{0}'. Valid options: + - * /")]
    UnknownOperator(String),

    /// Key name that maps to no intent.
    #[error("Key '{0}' has no calculator meaning")]
    UnknownKey(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_by_zero_message() {
        assert_eq!(DivisionByZero.to_string(), "Division by zero");
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::UnknownCurrency("USD".to_string());
        assert_eq!(err.to_string(), "Unknown currency 'USD'. Valid options: EUR, BGN");

        let err = ParseError::UnknownOperator("%".to_string());
        assert_eq!(err.to_string(), "Unknown operator '%'. Valid options: + - * /");

        let err = ParseError::UnknownKey("F1".to_string());
        assert_eq!(err.to_string(), "Key 'F1' has no calculator meaning");
    }
}
