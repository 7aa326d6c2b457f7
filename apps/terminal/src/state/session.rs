//! # Session State
//!
//! One calculator widget: the engine, both panels, and the collaborators
//! they persist to and copy through.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Input                    Session method         Side effect            │
//! │  ─────                    ──────────────         ───────────            │
//! │                                                                         │
//! │  key / button ──────────► press / press_key ──► paid field follows     │
//! │                                                  the calculator         │
//! │                                                                         │
//! │  tip people 3 ──────────► update_tip ─────────► preferences saved      │
//! │                                                  if they changed        │
//! │                                                                         │
//! │  change currency ... ───► update_change ──────► preferences saved      │
//! │                                                  if they changed        │
//! │                                                                         │
//! │  copy ──────────────────► copy ───────────────► clipboard (non-zero)   │
//! │                                                                         │
//! │  NOTE: a failed save is logged by the store and otherwise ignored;     │
//! │        in-memory settings are never rolled back.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::clipboard::copy_display;
use tally_core::{
    ChangePanel, Clipboard, Engine, Intent, PreferenceStore, Preferences, TipPanel,
};
use tracing::{debug, info, trace};

/// What happened to a keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The calculator received it.
    Applied,
    /// The open tip panel swallowed it (`Escape` also closed the panel).
    Intercepted,
    /// The key means nothing to the calculator.
    Unmapped,
}

/// The whole widget.
pub struct Session {
    engine: Engine,
    tip: TipPanel,
    change: ChangePanel,
    store: Box<dyn PreferenceStore>,
    clipboard: Box<dyn Clipboard>,
    saved: Preferences,
}

impl Session {
    /// Builds a session, seeding both panels from the store.
    pub fn new(store: Box<dyn PreferenceStore>, clipboard: Box<dyn Clipboard>) -> Self {
        let prefs = Preferences::load_from(store.as_ref());
        info!(
            people = prefs.people,
            tip_percent = prefs.tip_percent,
            price_currency = %prefs.price_currency,
            paid_currency = %prefs.paid_currency,
            "Preferences loaded"
        );

        Session {
            engine: Engine::new(),
            tip: TipPanel::new(prefs.tip_settings()),
            change: ChangePanel::new(prefs.change_settings()),
            store,
            clipboard,
            saved: prefs,
        }
    }

    // =========================================================================
    // Calculator
    // =========================================================================

    /// On-screen button press.
    ///
    /// Returns false without effect while the tip panel covers the keypad.
    pub fn press(&mut self, intent: Intent) -> bool {
        if self.tip.is_open() {
            return false;
        }
        self.engine.apply_intent(intent);
        self.after_engine_change();
        true
    }

    /// Keyboard key, by DOM-style key name (`"7"`, `"Enter"`, `"Escape"`).
    pub fn press_key(&mut self, key: &str) -> KeyOutcome {
        if self.tip.intercept_key(key) {
            trace!(key, open = self.tip.is_open(), "Key intercepted by tip panel");
            return KeyOutcome::Intercepted;
        }
        match Intent::from_key(key) {
            Some(intent) => {
                self.engine.apply_intent(intent);
                self.after_engine_change();
                KeyOutcome::Applied
            }
            None => KeyOutcome::Unmapped,
        }
    }

    /// Copies the display if it holds a non-zero number.
    pub fn copy(&mut self) -> bool {
        copy_display(&self.engine.formatted_display(), self.clipboard.as_mut())
    }

    fn after_engine_change(&mut self) {
        if self.change.follow_calculator(&self.engine) {
            trace!(paid = self.change.paid_text(), "Paid field follows calculator");
        }
    }

    // =========================================================================
    // Panels
    // =========================================================================

    /// Opens the tip panel with the calculator's value as the bill.
    ///
    /// Refused while the display shows an error.
    pub fn open_tip(&mut self) -> bool {
        let opened = self.tip.open_from(&self.engine);
        debug!(opened, base = self.tip.base_text(), "Tip panel open requested");
        opened
    }

    /// Closes the tip panel.
    pub fn close_tip(&mut self) {
        self.tip.close();
    }

    /// Edits the tip panel, then saves preferences if they changed.
    pub fn update_tip<R>(&mut self, edit: impl FnOnce(&mut TipPanel) -> R) -> R {
        let result = edit(&mut self.tip);
        self.persist_if_changed();
        result
    }

    /// Edits the change panel, then saves preferences if they changed.
    pub fn update_change<R>(&mut self, edit: impl FnOnce(&mut ChangePanel) -> R) -> R {
        let result = edit(&mut self.change);
        self.persist_if_changed();
        result
    }

    /// Unlocks the paid field and copies the calculator's value into it.
    pub fn sync_paid(&mut self) -> bool {
        self.change.resync(&self.engine)
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Current persisted view of both panels.
    pub fn preferences(&self) -> Preferences {
        Preferences::from_parts(self.tip.settings(), self.change.settings())
    }

    fn persist_if_changed(&mut self) {
        let current = self.preferences();
        if current == self.saved {
            return;
        }
        let saved = current.save_to(self.store.as_mut());
        debug!(saved, "Preferences changed");
        self.saved = current;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn tip(&self) -> &TipPanel {
        &self.tip
    }

    pub fn change(&self) -> &ChangePanel {
        &self.change
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
