//! # State Module
//!
//! Holds the running widget for the terminal host.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Session                                 │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐      │   │
//! │  │  │   Engine     │  │  TipPanel    │  │   ChangePanel    │      │   │
//! │  │  │  (keypad)    │  │  (bill, %,   │  │  (price, paid,   │      │   │
//! │  │  │              │  │   people)    │  │   currencies)    │      │   │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────┘      │   │
//! │  │                                                                 │   │
//! │  │  Box<dyn PreferenceStore>        Box<dyn Clipboard>             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Single-threaded: one line of input is handled to completion before   │
//! │  the next is read, so no locking is needed.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod session;

pub use session::{KeyOutcome, Session};
