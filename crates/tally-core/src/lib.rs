//! # tally-core: Pure Calculator Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the keypad state
//! machine and the derived money calculators as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host (terminal, browser glue)                   │   │
//! │  │      Keypad ──► Display      Tip panel      Change panel        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Intent / settings writes               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  engine   │  │    tip    │  │  change   │  │   prefs   │  │   │
//! │  │   │  Entry    │  │ Settings  │  │ Currency  │  │  Record   │  │   │
//! │  │   │ Operator  │  │ Breakdown │  │ Breakdown │  │   Store   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLIPBOARD • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-prefs (Persistence Layer)                 │   │
//! │  │              JSON file store, in-memory store                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Keypad state machine (entry, accumulator, pending operator)
//! - [`entry`] - The textual number being typed
//! - [`operator`] - Binary operators and their application
//! - [`format`] - Number to text rendering rules
//! - [`input`] - Intents and keyboard mapping
//! - [`money`] - Currencies, exchange rate and money text parsing
//! - [`tip`] - Tip splitter
//! - [`change`] - Change / payment converter
//! - [`prefs`] - Preference record and the store contract
//! - [`clipboard`] - Copy rules and the clipboard contract
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::engine::Engine;
//! use tally_core::operator::Operator;
//!
//! let mut engine = Engine::new();
//! engine.input_digit('5');
//! engine.input_operator(Operator::Add);
//! engine.input_digit('3');
//! engine.input_operator(Operator::Multiply);
//! engine.input_digit('2');
//! engine.equals();
//!
//! // Left-to-right, no precedence: (5 + 3) * 2
//! assert_eq!(engine.formatted_display(), "16");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change;
pub mod clipboard;
pub mod engine;
pub mod entry;
pub mod error;
pub mod format;
pub mod input;
pub mod money;
pub mod operator;
pub mod prefs;
pub mod tip;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use change::{ChangeBreakdown, ChangeLabel, ChangePanel, ChangeSettings};
pub use clipboard::{copyable_text, Clipboard};
pub use engine::{DisplayView, Engine, EngineState};
pub use error::{DivisionByZero, ParseError};
pub use input::Intent;
pub use money::{parse_money, Currency};
pub use operator::Operator;
pub use prefs::{PreferenceRecord, PreferenceStore, Preferences};
pub use tip::{TipBreakdown, TipPanel, TipSettings};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Entries longer than this are shown in 8-significant-digit form.
pub const MAX_DISPLAY_CHARS: usize = 12;

/// Significant digits used when an entry is too long to show verbatim.
pub const DISPLAY_SIGNIFICANT_DIGITS: usize = 8;

/// Smallest party size the tip splitter accepts.
pub const MIN_PEOPLE: u8 = 1;

/// Largest party size the tip splitter accepts.
pub const MAX_PEOPLE: u8 = 10;

/// Lowest tip percentage.
pub const MIN_TIP_PERCENT: f64 = 0.0;

/// Highest tip percentage.
///
/// ## Business Reason
/// Guards against a slipped keystroke (150 instead of 15) silently
/// tripling the bill.
pub const MAX_TIP_PERCENT: f64 = 50.0;

/// Tip percentages offered as one-tap chips.
pub const TIP_PRESETS: [u8; 4] = [5, 10, 15, 20];

/// Fixed conversion rate: BGN per 1 EUR (the currency board peg).
pub const EXCHANGE_RATE: f64 = 1.95583;
