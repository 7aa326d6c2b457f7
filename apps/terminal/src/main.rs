//! # Tally Entry Point
//!
//! ## Usage
//!
//! ```bash
//! tally                         # interactive session
//! tally --keys "100*1.2="       # print the display for a key sequence
//! tally --no-clipboard --prefs ./prefs.json
//! ```
//!
//! The actual setup is in lib.rs so tests can drive a session directly.

use std::process::ExitCode;

use clap::Parser;
use tally_terminal::cli::Cli;

fn main() -> ExitCode {
    match tally_terminal::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
