//! # Preferences
//!
//! The configurable parameters of the widget and their flat record form.
//!
//! ## Record Layout
//! ```text
//! {
//!   "people": 3,              1..=10, clamped
//!   "tipPercent": 15,         0..=50, clamped
//!   "customTip": false,
//!   "roundToHalf": true,
//!   "priceCurrency": "EUR",
//!   "paidCurrency": "BGN",
//!   "outputCurrency": "EUR",
//!   "splitEnabled": false
//! }
//! ```
//!
//! Loading is field-by-field: a missing or ill-typed field falls back to
//! its default without affecting the others.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::change::ChangeSettings;
use crate::money::Currency;
use crate::tip::TipSettings;

/// Flat key-value form handed to a [`PreferenceStore`].
pub type PreferenceRecord = Map<String, Value>;

const KEY_PEOPLE: &str = "people";
const KEY_TIP_PERCENT: &str = "tipPercent";
const KEY_CUSTOM_TIP: &str = "customTip";
const KEY_ROUND_TO_HALF: &str = "roundToHalf";
const KEY_PRICE_CURRENCY: &str = "priceCurrency";
const KEY_PAID_CURRENCY: &str = "paidCurrency";
const KEY_OUTPUT_CURRENCY: &str = "outputCurrency";
const KEY_SPLIT_ENABLED: &str = "splitEnabled";

// =============================================================================
// Store Contract
// =============================================================================

/// Best-effort persistence collaborator.
///
/// Implementations never panic and never surface errors: a failed write
/// returns `false`, a failed or empty read returns `None`. Callers do not
/// roll back in-memory state when a write fails.
pub trait PreferenceStore {
    /// Writes the record, replacing any previous one.
    fn try_save(&mut self, record: &PreferenceRecord) -> bool;

    /// Reads the last written record, if any.
    fn try_load(&self) -> Option<PreferenceRecord>;
}

// =============================================================================
// Preferences
// =============================================================================

/// Everything that survives a restart.
///
/// Deserializing goes through [`Preferences::from_record`], so the
/// clamping and per-field fallbacks apply to every source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Preferences {
    pub people: u8,
    pub tip_percent: f64,
    pub custom_tip: bool,
    pub round_to_half: bool,
    pub price_currency: Currency,
    pub paid_currency: Currency,
    pub output_currency: Currency,
    pub split_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences::from_parts(&TipSettings::default(), &ChangeSettings::default())
    }
}

impl Preferences {
    /// Collects the persisted fields of both panels.
    pub fn from_parts(tip: &TipSettings, change: &ChangeSettings) -> Self {
        Preferences {
            people: tip.people(),
            tip_percent: tip.tip_percent(),
            custom_tip: tip.custom_enabled(),
            round_to_half: tip.round_to_half(),
            price_currency: change.price_currency,
            paid_currency: change.paid_currency,
            output_currency: change.output_currency,
            split_enabled: change.split_enabled,
        }
    }

    /// Tip settings, clamped.
    pub fn tip_settings(&self) -> TipSettings {
        TipSettings::new(
            i64::from(self.people),
            self.tip_percent,
            self.custom_tip,
            self.round_to_half,
        )
    }

    /// Change panel settings.
    pub fn change_settings(&self) -> ChangeSettings {
        ChangeSettings {
            price_currency: self.price_currency,
            paid_currency: self.paid_currency,
            output_currency: self.output_currency,
            split_enabled: self.split_enabled,
        }
    }

    /// Flat record for a store.
    pub fn to_record(&self) -> PreferenceRecord {
        let mut record = Map::new();
        record.insert(KEY_PEOPLE.into(), Value::from(self.people));
        record.insert(KEY_TIP_PERCENT.into(), Value::from(self.tip_percent));
        record.insert(KEY_CUSTOM_TIP.into(), Value::from(self.custom_tip));
        record.insert(KEY_ROUND_TO_HALF.into(), Value::from(self.round_to_half));
        record.insert(KEY_PRICE_CURRENCY.into(), Value::from(self.price_currency.code()));
        record.insert(KEY_PAID_CURRENCY.into(), Value::from(self.paid_currency.code()));
        record.insert(KEY_OUTPUT_CURRENCY.into(), Value::from(self.output_currency.code()));
        record.insert(KEY_SPLIT_ENABLED.into(), Value::from(self.split_enabled));
        record
    }

    /// Reads a record, field by field.
    ///
    /// ## Example
    /// ```rust
    /// use serde_json::json;
    /// use tally_core::prefs::Preferences;
    ///
    /// let record = json!({ "people": 40, "tipPercent": "lots", "splitEnabled": true });
    /// let prefs = Preferences::from_record(record.as_object().unwrap());
    ///
    /// assert_eq!(prefs.people, 10);          // clamped
    /// assert_eq!(prefs.tip_percent, 10.0);   // ill-typed, default
    /// assert!(prefs.split_enabled);
    /// ```
    pub fn from_record(record: &PreferenceRecord) -> Self {
        let defaults = Preferences::default();

        let people = record
            .get(KEY_PEOPLE)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
            .map_or(i64::from(defaults.people), |n| n.trunc() as i64);
        let tip_percent = record
            .get(KEY_TIP_PERCENT)
            .and_then(Value::as_f64)
            .unwrap_or(defaults.tip_percent);

        let flag = |key: &str, default: bool| record.get(key).and_then(Value::as_bool).unwrap_or(default);
        let currency = |key: &str, default: Currency| {
            record
                .get(key)
                .and_then(Value::as_str)
                .and_then(|code| code.parse::<Currency>().ok())
                .unwrap_or(default)
        };

        let tip = TipSettings::new(
            people,
            tip_percent,
            flag(KEY_CUSTOM_TIP, defaults.custom_tip),
            flag(KEY_ROUND_TO_HALF, defaults.round_to_half),
        );
        let change = ChangeSettings {
            price_currency: currency(KEY_PRICE_CURRENCY, defaults.price_currency),
            paid_currency: currency(KEY_PAID_CURRENCY, defaults.paid_currency),
            output_currency: currency(KEY_OUTPUT_CURRENCY, defaults.output_currency),
            split_enabled: flag(KEY_SPLIT_ENABLED, defaults.split_enabled),
        };

        Preferences::from_parts(&tip, &change)
    }

    /// Loads from a store, falling back to defaults when nothing is stored.
    pub fn load_from(store: &dyn PreferenceStore) -> Self {
        store
            .try_load()
            .map(|record| Preferences::from_record(&record))
            .unwrap_or_default()
    }

    /// Writes to a store. Returns the store's verdict.
    pub fn save_to(&self, store: &mut dyn PreferenceStore) -> bool {
        store.try_save(&self.to_record())
    }
}

impl<'de> Deserialize<'de> for Preferences {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        PreferenceRecord::deserialize(deserializer).map(|record| Preferences::from_record(&record))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct SlotStore {
        slot: Option<PreferenceRecord>,
        refuse: bool,
    }

    impl PreferenceStore for SlotStore {
        fn try_save(&mut self, record: &PreferenceRecord) -> bool {
            if self.refuse {
                return false;
            }
            self.slot = Some(record.clone());
            true
        }

        fn try_load(&self) -> Option<PreferenceRecord> {
            self.slot.clone()
        }
    }

    fn record(value: Value) -> PreferenceRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.people, 1);
        assert_eq!(prefs.tip_percent, 10.0);
        assert!(!prefs.custom_tip);
        assert!(!prefs.round_to_half);
        assert_eq!(prefs.price_currency, Currency::Eur);
        assert_eq!(prefs.paid_currency, Currency::Eur);
        assert_eq!(prefs.output_currency, Currency::Eur);
        assert!(!prefs.split_enabled);
    }

    #[test]
    fn test_record_keys_are_camel_case() {
        let rec = Preferences::default().to_record();
        assert_eq!(rec["people"], json!(1));
        assert_eq!(rec["tipPercent"], json!(10.0));
        assert_eq!(rec["priceCurrency"], json!("EUR"));
        assert_eq!(rec["splitEnabled"], json!(false));
        assert_eq!(rec.len(), 8);
    }

    #[test]
    fn test_empty_record_gives_defaults() {
        assert_eq!(Preferences::from_record(&Map::new()), Preferences::default());
    }

    #[test]
    fn test_fields_fall_back_independently() {
        let prefs = Preferences::from_record(&record(json!({
            "people": "three",
            "tipPercent": 18,
            "customTip": 1,
            "roundToHalf": true,
            "priceCurrency": "USD",
            "paidCurrency": "BGN",
            "outputCurrency": null,
        })));

        assert_eq!(prefs.people, 1);
        assert_eq!(prefs.tip_percent, 18.0);
        assert!(!prefs.custom_tip);
        assert!(prefs.round_to_half);
        assert_eq!(prefs.price_currency, Currency::Eur);
        assert_eq!(prefs.paid_currency, Currency::Bgn);
        assert_eq!(prefs.output_currency, Currency::Eur);
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped() {
        let prefs = Preferences::from_record(&record(json!({
            "people": -4,
            "tipPercent": 75.5,
        })));
        assert_eq!(prefs.people, 1);
        assert_eq!(prefs.tip_percent, 50.0);

        let prefs = Preferences::from_record(&record(json!({ "people": 1e9 })));
        assert_eq!(prefs.people, 10);
    }

    #[test]
    fn test_deserialize_clamps_like_from_record() {
        let prefs: Preferences = serde_json::from_value(json!({
            "people": 200,
            "tipPercent": -5,
            "paidCurrency": "BGN",
        }))
        .unwrap();
        assert_eq!(prefs.people, 10);
        assert_eq!(prefs.tip_percent, 0.0);
        assert_eq!(prefs.paid_currency, Currency::Bgn);
        assert_eq!(prefs.price_currency, Currency::Eur);

        let original = Preferences {
            people: 4,
            round_to_half: true,
            ..Preferences::default()
        };
        let text = serde_json::to_string(&original).unwrap();
        assert_eq!(serde_json::from_str::<Preferences>(&text).unwrap(), original);

        assert!(serde_json::from_value::<Preferences>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_settings_survive_a_store() {
        let mut tip = TipSettings::default();
        tip.set_people(4);
        tip.set_custom_percent("12.5");
        let change = ChangeSettings {
            price_currency: Currency::Bgn,
            paid_currency: Currency::Eur,
            output_currency: Currency::Bgn,
            split_enabled: true,
        };

        let mut store = SlotStore::default();
        assert!(Preferences::from_parts(&tip, &change).save_to(&mut store));

        let loaded = Preferences::load_from(&store);
        assert_eq!(loaded.tip_settings(), tip);
        assert_eq!(loaded.change_settings(), change);
    }

    #[test]
    fn test_failed_save_reports_false() {
        let mut store = SlotStore {
            refuse: true,
            ..SlotStore::default()
        };
        assert!(!Preferences::default().save_to(&mut store));
        assert_eq!(Preferences::load_from(&store), Preferences::default());
    }
}
