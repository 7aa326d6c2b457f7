//! # Commands Module
//!
//! One line of input is one command.
//!
//! ## Command Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input                      Command            Handler                  │
//! │  ─────                      ───────            ───────                  │
//! │  12+3*2=                    Buttons            calc::press_buttons      │
//! │  key Escape                 Key                calc::press_key          │
//! │  ac | ce | back             Buttons            calc::press_buttons      │
//! │  copy                       Copy               calc::copy               │
//! │  tip ...                    Tip                tip::execute             │
//! │  change ...                 Change             change::execute          │
//! │  show | help | quit                            (here)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line whose first word is not a command is read as a key sequence.

pub mod calc;
pub mod change;
pub mod tip;

use std::str::FromStr;

use tally_core::Intent;

use crate::error::{AppError, AppResult};
use crate::state::Session;
use change::ChangeCommand;
use tip::TipCommand;

/// Text printed by `help`.
pub const HELP: &str = "\
Calculator
  12+3*2=          type keys (digits, . + - * / =)
  key <name>       press one key: Enter, Backspace, Escape, 7, ...
  ac | ce | back   clear all, clear entry, backspace
  copy             copy the display (non-zero numbers only)
  show             show the display
Tip
  tip              open with the display as the bill
  tip bill <amount> | people <n|+|-> | preset <5|10|15|20>
  tip custom <percent> | round <on|off> | show | close
Change
  change           show the result
  change price <amount> | paid <amount> | also <amount>
  change split [on|off] | sync
  change currency <price|paid|out> <EUR|BGN>
Other
  help | quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Show,
    Quit,
    Copy,
    Buttons(Vec<Intent>),
    Key(String),
    Tip(TipCommand),
    Change(ChangeCommand),
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = words.first() else {
            return Ok(Command::Show);
        };
        let args = &words[1..];

        match first.to_lowercase().as_str() {
            "help" | "?" => Ok(Command::Help),
            "show" => Ok(Command::Show),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "copy" => Ok(Command::Copy),
            "ac" => Ok(Command::Buttons(vec![Intent::ClearAll])),
            "ce" | "c" => Ok(Command::Buttons(vec![Intent::ClearEntry])),
            "back" | "bs" => Ok(Command::Buttons(vec![Intent::Backspace])),
            "key" => match args {
                [name] => Ok(Command::Key(name.to_string())),
                _ => Err(AppError::Usage("key <name>")),
            },
            "tip" => TipCommand::parse(args).map(Command::Tip),
            "change" => ChangeCommand::parse(args).map(Command::Change),
            _ => Intent::parse_sequence(line)
                .map(Command::Buttons)
                .map_err(|_| AppError::UnknownCommand(first.to_string())),
        }
    }
}

/// What the host should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and read the next line.
    Continue(String),
    /// Stop.
    Quit,
}

/// Runs a parsed command.
pub fn execute(session: &mut Session, command: Command) -> Outcome {
    let output = match command {
        Command::Help => HELP.to_string(),
        Command::Show => calc::render_display(session.engine()),
        Command::Quit => return Outcome::Quit,
        Command::Copy => calc::copy(session),
        Command::Buttons(intents) => calc::press_buttons(session, &intents),
        Command::Key(name) => calc::press_key(session, &name),
        Command::Tip(command) => tip::execute(session, command),
        Command::Change(command) => change::execute(session, command),
    };
    Outcome::Continue(output)
}

/// Parses and runs one input line.
pub fn handle_line(session: &mut Session, line: &str) -> AppResult<Outcome> {
    let command: Command = line.parse()?;
    Ok(execute(session, command))
}
