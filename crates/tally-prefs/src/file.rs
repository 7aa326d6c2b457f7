//! # JSON File Store
//!
//! Keeps the preference record as a pretty-printed JSON object on disk.
//!
//! ## Location
//! ```text
//! Linux:   ~/.local/share/tally/preferences.json
//! macOS:   ~/Library/Application Support/com.tally.widget/preferences.json
//! Windows: %APPDATA%\tally\widget\data\preferences.json
//! ```
//! Overridable through the terminal's config file or `TALLY_PREFS_PATH`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;
use tally_core::{PreferenceRecord, PreferenceStore};
use tracing::{debug, warn};

use crate::error::{PrefsError, PrefsResult};

/// File name used inside the platform data directory.
pub const PREFS_FILE_NAME: &str = "preferences.json";

/// Preference store backed by one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given file. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    /// Store at the platform default location.
    pub fn at_default_location() -> PrefsResult<Self> {
        default_path().map(JsonFileStore::new)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record.
    ///
    /// A missing file is `Ok(None)`, not an error.
    pub fn load(&self) -> PrefsResult<Option<PreferenceRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No preferences file yet");
                return Ok(None);
            }
            Err(err) => return Err(PrefsError::io(&self.path, err)),
        };

        match serde_json::from_str::<Value>(&contents)? {
            Value::Object(record) => Ok(Some(record)),
            other => Err(PrefsError::NotAnObject(json_kind(&other).to_string())),
        }
    }

    /// Writes the record, creating parent directories as needed.
    pub fn save(&self, record: &PreferenceRecord) -> PrefsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PrefsError::io(parent, e))?;
            }
        }

        let contents = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, contents).map_err(|e| PrefsError::io(&self.path, e))?;

        debug!(path = ?self.path, "Preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn try_save(&mut self, record: &PreferenceRecord) -> bool {
        match self.save(record) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to save preferences");
                false
            }
        }
    }

    fn try_load(&self) -> Option<PreferenceRecord> {
        self.load().unwrap_or_else(|e| {
            warn!(path = ?self.path, error = %e, "Failed to load preferences. Using defaults.");
            None
        })
    }
}

/// Platform default path of the preferences file.
pub fn default_path() -> PrefsResult<PathBuf> {
    ProjectDirs::from("com", "tally", "widget")
        .map(|dirs| dirs.data_dir().join(PREFS_FILE_NAME))
        .ok_or(PrefsError::NoDataDir)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
