//! Command-line flags.

use std::path::PathBuf;

use clap::Parser;

/// Calculator, tip splitter and EUR/BGN change converter.
#[derive(Parser, Debug, Default, Clone)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: tally.toml in the platform config directory)
    #[arg(short, long, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Preferences file, overriding the config
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Do not touch the system clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Do not persist preferences for this run
    #[arg(long)]
    pub no_persist: bool,

    /// Type a key sequence (e.g. "12+3*2="), print the display and exit
    #[arg(short, long, value_name = "SEQUENCE")]
    pub keys: Option<String>,
}
