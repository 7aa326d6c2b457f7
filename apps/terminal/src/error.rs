//! # App Error Type
//!
//! Unified error type for the terminal host.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Startup                         REPL line                              │
//! │  ───────                         ─────────                              │
//! │  tally.toml unreadable ──┐       "tip people lots" ──┐                  │
//! │  TALLY_LOG invalid ──────┤       "change paid" ──────┤                  │
//! │                          ▼                           ▼                  │
//! │                       AppError ◄──── ParseError (tally-core)            │
//! │                          │                                              │
//! │         ┌────────────────┴───────────────┐                              │
//! │         ▼                                ▼                              │
//! │  Config: warn + defaults         Command: printed, session continues   │
//! │                                                                         │
//! │  Calculator errors are NOT here: division by zero is a display state.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::ParseError;
use thiserror::Error;

/// Errors surfaced by the terminal host.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading a file or the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::config::AppConfig`].
    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config parsed but a value is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A currency, operator or key name was not recognised.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The first word of a line is not a command.
    #[error("Unknown command '{0}'. Type 'help' for a list of commands")]
    UnknownCommand(String),

    /// A command was given the wrong arguments.
    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl AppError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        AppError::InvalidConfig(message.into())
    }
}

/// Result type for the terminal host.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AppError::UnknownCommand("frobnicate".into()).to_string(),
            "Unknown command 'frobnicate'. Type 'help' for a list of commands"
        );
        assert_eq!(
            AppError::Usage("tip people <1-10|+|->").to_string(),
            "Usage: tip people <1-10|+|->"
        );
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: AppError = ParseError::UnknownCurrency("USD".into()).into();
        assert_eq!(
            err.to_string(),
            "Unknown currency 'USD'. Valid options: EUR, BGN"
        );
    }
}
