//! # Terminal Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --prefs ./prefs.json  --no-clipboard  --no-persist                 │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TALLY_PREFS_PATH=/tmp/prefs.json                                   │
//! │     TALLY_LOG=debug                                                    │
//! │     TALLY_CLIPBOARD=off                                                │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/tally/tally.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.tally.widget/tally.toml (macOS)  │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tally.toml
//! [preferences]
//! path = "/home/me/.tally/preferences.json"
//! persist = true
//!
//! [clipboard]
//! enabled = true
//!
//! [logging]
//! filter = "warn,tally=info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "tally.toml";

/// Log filter used when neither the config nor `RUST_LOG` sets one.
pub const DEFAULT_LOG_FILTER: &str = "warn,tally=info";

// =============================================================================
// Sections
// =============================================================================

/// `[preferences]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Preferences file. `None` means the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Whether settings are written anywhere at all.
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        PreferencesConfig {
            path: None,
            persist: true,
        }
    }
}

/// `[clipboard]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        ClipboardConfig { enabled: true }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub preferences: PreferencesConfig,

    #[serde(default)]
    pub clipboard: ClipboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tally.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses the TOML text of a config file.
    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.logging.filter.trim().is_empty() {
            return Err(AppError::invalid_config("logging.filter must not be empty"));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.filter) {
            return Err(AppError::invalid_config(format!(
                "logging.filter '{}' is not a valid filter: {}",
                self.logging.filter, e
            )));
        }

        if let Some(ref path) = self.preferences.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::invalid_config("preferences.path must not be empty"));
            }
            if path.is_dir() {
                return Err(AppError::invalid_config(format!(
                    "preferences.path {} is a directory",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Applies command-line flags on top of everything else.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref path) = cli.prefs {
            self.preferences.path = Some(path.clone());
        }
        if cli.no_persist {
            self.preferences.persist = false;
        }
        if cli.no_clipboard {
            self.clipboard.enabled = false;
        }
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("TALLY_PREFS_PATH") {
            debug!(path = %path, "Overriding preferences path from environment");
            self.preferences.path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("TALLY_LOG") {
            self.logging.filter = filter;
        }

        if let Some(value) = lookup("TALLY_CLIPBOARD") {
            match parse_switch(&value) {
                Some(enabled) => self.clipboard.enabled = enabled,
                None => warn!(value = %value, "Unknown TALLY_CLIPBOARD value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tally", "widget")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// Parses `on/off`, `true/false`, `1/0`, `yes/no`.
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.preferences.path, None);
        assert!(config.preferences.persist);
        assert!(config.clipboard.enabled);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml("[clipboard]\nenabled = false\n").unwrap();
        assert!(!config.clipboard.enabled);
        assert!(config.preferences.persist);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_full_toml() {
        let config = AppConfig::from_toml(
            r#"
            [preferences]
            path = "/tmp/tally/prefs.json"
            persist = false

            [logging]
            filter = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.preferences.path,
            Some(PathBuf::from("/tmp/tally/prefs.json"))
        );
        assert!(!config.preferences.persist);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            AppConfig::from_toml("[clipboard]\nenabled = \"maybe\""),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[logging]\nfilter = \"info\"\n").unwrap();

        let config = AppConfig::load(Some(path)).unwrap();
        assert!(config.clipboard.enabled);
        assert!(config.preferences.persist);
    }

    #[test]
    fn test_missing_explicit_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unreadable_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "this is not toml =").unwrap();

        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(AppError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[
            ("TALLY_PREFS_PATH", "/tmp/p.json"),
            ("TALLY_LOG", "trace"),
            ("TALLY_CLIPBOARD", "off"),
        ]));
        assert_eq!(config.preferences.path, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(config.logging.filter, "trace");
        assert!(!config.clipboard.enabled);
    }

    #[test]
    fn test_unknown_clipboard_switch_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[("TALLY_CLIPBOARD", "sometimes")]));
        assert!(config.clipboard.enabled);
    }

    #[test]
    fn test_cli_wins() {
        let mut config = AppConfig::default();
        config.apply_overrides(lookup_from(&[("TALLY_PREFS_PATH", "/tmp/env.json")]));
        let cli = Cli {
            prefs: Some(PathBuf::from("/tmp/flag.json")),
            no_clipboard: true,
            no_persist: true,
            ..Cli::default()
        };
        config.apply_cli(&cli);
        assert_eq!(config.preferences.path, Some(PathBuf::from("/tmp/flag.json")));
        assert!(!config.clipboard.enabled);
        assert!(!config.preferences.persist);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.logging.filter = "  ".into();
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));

        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.preferences.path = Some(dir.path().to_path_buf());
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("ON"), Some(true));
        assert_eq!(parse_switch("0"), Some(false));
        assert_eq!(parse_switch("later"), None);
    }
}
