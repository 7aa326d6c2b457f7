//! # tally-prefs: Preference Stores for Tally
//!
//! Implementations of [`tally_core::PreferenceStore`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Settings change (people, tip %, currency, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Preferences::to_record()        (tally-core)                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-prefs (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐          ┌──────────────────┐           │   │
//! │  │   │  JsonFileStore   │          │   MemoryStore    │           │   │
//! │  │   │  (file.rs)       │          │   (memory.rs)    │           │   │
//! │  │   │                  │          │                  │           │   │
//! │  │   │ preferences.json │          │ "tally.          │           │   │
//! │  │   │ in the data dir  │          │  preferences"    │           │   │
//! │  │   └──────────────────┘          └──────────────────┘           │   │
//! │  │                                                                 │   │
//! │  │   Errors are logged with tracing, then swallowed.              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use tally_core::Preferences;
//! use tally_prefs::MemoryStore;
//!
//! let mut store = MemoryStore::new();
//! let mut prefs = Preferences::default();
//! prefs.people = 4;
//!
//! assert!(prefs.save_to(&mut store));
//! assert_eq!(Preferences::load_from(&store).people, 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{PrefsError, PrefsResult};
pub use file::JsonFileStore;
pub use memory::{MemoryStore, STORAGE_KEY};
