//! # Tally Terminal Library
//!
//! The calculator widget as an interactive terminal session.
//!
//! ## Module Organization
//! ```text
//! tally_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run loop)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── config.rs       ◄─── tally.toml + environment overrides
//! ├── clipboard.rs    ◄─── arboard-backed clipboard
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── session.rs  ◄─── Engine + panels + collaborators
//! ├── commands/
//! │   ├── mod.rs      ◄─── Line parsing and dispatch
//! │   ├── calc.rs     ◄─── Keys, buttons, copy, display box
//! │   ├── tip.rs      ◄─── Tip panel commands
//! │   └── change.rs   ◄─── Change panel commands
//! └── error.rs        ◄─── App error type
//! ```

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::io::{BufRead, Write};

use tally_core::{Clipboard, Intent, PreferenceStore};
use tally_prefs::{JsonFileStore, MemoryStore};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use clipboard::{DisabledClipboard, SystemClipboard};
use commands::Outcome;
use config::AppConfig;
use error::AppResult;
use state::Session;

/// Runs the terminal application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • tally.toml, TALLY_* environment, then flags                       │
/// │     • A broken config file falls back to defaults (with a warning)      │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG if set, else [logging] filter                            │
/// │     • Written to stderr                                                 │
/// │                                                                         │
/// │  3. Open Collaborators ───────────────────────────────────────────────► │
/// │     • Preference store (JSON file or in-memory)                         │
/// │     • Clipboard (system or disabled)                                    │
/// │                                                                         │
/// │  4. Run ──────────────────────────────────────────────────────────────► │
/// │     • --keys: type the sequence, print the display, exit                │
/// │     • otherwise: read commands from stdin until quit/EOF                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> AppResult<()> {
    let (mut config, load_error) = match AppConfig::load(cli.config.clone()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_cli(&cli);

    init_tracing(&config.logging.filter);
    if let Some(e) = load_error {
        warn!("Failed to load config: {}. Using defaults.", e);
    }
    info!("Starting Tally");

    let mut session = Session::new(open_store(&config), open_clipboard(&config));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.keys {
        Some(ref sequence) => run_keys(&mut session, sequence, &mut out),
        None => {
            let stdin = std::io::stdin();
            repl(&mut session, stdin.lock(), &mut out)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally=trace` - Show trace for tally crates only
/// - Default: the configured filter (`warn,tally=info`)
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Chooses the preference store from the configuration.
pub fn open_store(config: &AppConfig) -> Box<dyn PreferenceStore> {
    if !config.preferences.persist {
        debug!("Persistence disabled, preferences kept in memory");
        return Box::new(MemoryStore::new());
    }

    let store = match config.preferences.path {
        Some(ref path) => JsonFileStore::new(path),
        None => match JsonFileStore::at_default_location() {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Preferences will not be saved");
                return Box::new(MemoryStore::new());
            }
        },
    };
    info!(path = ?store.path(), "Using preferences file");
    Box::new(store)
}

/// Chooses the clipboard from the configuration.
pub fn open_clipboard(config: &AppConfig) -> Box<dyn Clipboard> {
    if config.clipboard.enabled {
        Box::new(SystemClipboard::new())
    } else {
        Box::new(DisabledClipboard)
    }
}

/// One-shot mode: types `sequence` and prints the display text.
pub fn run_keys(session: &mut Session, sequence: &str, out: &mut impl Write) -> AppResult<()> {
    for intent in Intent::parse_sequence(sequence)? {
        session.press(intent);
    }
    writeln!(out, "{}", session.engine().formatted_display())?;
    Ok(())
}

/// Interactive mode: one command per line until `quit` or end of input.
///
/// Command errors are printed and the session carries on.
pub fn repl(session: &mut Session, input: impl BufRead, out: &mut impl Write) -> AppResult<()> {
    writeln!(out, "{}", commands::calc::render_display(session.engine()))?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match commands::handle_line(session, &line) {
            Ok(Outcome::Continue(output)) => writeln!(out, "{output}")?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                debug!(line = %line, error = %e, "Command rejected");
                writeln!(out, "{e}")?;
            }
        }
    }

    info!("Session ended");
    Ok(())
}
