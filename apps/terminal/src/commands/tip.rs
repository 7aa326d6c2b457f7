//! # Tip Commands
//!
//! ## Tip Panel Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   tip (calculator not errored)   ┌──────────────────┐    │
//! │  │  Closed  │─────────────────────────────────►│  Open            │    │
//! │  │          │◄─────────────────────────────────│  bill = display  │    │
//! │  └──────────┘   tip close / key Escape         └──────────────────┘    │
//! │                                                        │               │
//! │                     tip bill · people · preset · custom · round        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::money::format_amount;
use tally_core::{TipPanel, TIP_PRESETS};

use crate::config::parse_switch;
use crate::error::{AppError, AppResult};
use crate::state::Session;

const USAGE: &str =
    "tip [open|close|show|bill <amount>|people <1-10|+|->|preset <5|10|15|20>|custom <percent>|round <on|off>]";

/// A parsed `tip ...` line.
#[derive(Debug, Clone, PartialEq)]
pub enum TipCommand {
    Open,
    Close,
    Show,
    Bill(String),
    People(PeopleChange),
    Preset(u8),
    Custom(String),
    Round(bool),
}

/// Argument of `tip people`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeopleChange {
    Set(i64),
    Step(i64),
}

impl TipCommand {
    /// Parses the words after `tip`.
    pub fn parse(args: &[&str]) -> AppResult<Self> {
        let usage = || AppError::Usage(USAGE);
        let rest = || args[1..].join(" ");

        let Some(&sub) = args.first() else {
            return Ok(TipCommand::Open);
        };

        match sub.to_lowercase().as_str() {
            "open" => Ok(TipCommand::Open),
            "close" => Ok(TipCommand::Close),
            "show" => Ok(TipCommand::Show),
            "bill" | "base" if args.len() > 1 => Ok(TipCommand::Bill(rest())),
            "people" => match args.get(1).copied() {
                Some("+") => Ok(TipCommand::People(PeopleChange::Step(1))),
                Some("-") => Ok(TipCommand::People(PeopleChange::Step(-1))),
                Some(n) => n
                    .parse()
                    .map(|n| TipCommand::People(PeopleChange::Set(n)))
                    .map_err(|_| usage()),
                None => Err(usage()),
            },
            "preset" => args
                .get(1)
                .and_then(|p| p.trim_end_matches('%').parse::<u8>().ok())
                .filter(|p| TIP_PRESETS.contains(p))
                .map(TipCommand::Preset)
                .ok_or_else(usage),
            "custom" if args.len() > 1 => Ok(TipCommand::Custom(rest())),
            "round" => args
                .get(1)
                .and_then(|v| parse_switch(v))
                .map(TipCommand::Round)
                .ok_or_else(usage),
            _ => Err(usage()),
        }
    }
}

/// Runs a tip command and renders the panel.
pub fn execute(session: &mut Session, command: TipCommand) -> String {
    match command {
        TipCommand::Open => {
            if !session.tip().is_open() && !session.open_tip() {
                return "Cannot split a tip while the display shows Error.".to_string();
            }
        }
        TipCommand::Close => {
            session.close_tip();
            return "Tip panel closed.".to_string();
        }
        TipCommand::Show => {}
        TipCommand::Bill(text) => session.update_tip(|tip| tip.set_base_text(text)),
        TipCommand::People(PeopleChange::Set(n)) => {
            session.update_tip(|tip| tip.settings_mut().set_people(n))
        }
        TipCommand::People(PeopleChange::Step(delta)) => {
            session.update_tip(|tip| tip.settings_mut().step_people(delta))
        }
        TipCommand::Preset(percent) => {
            session.update_tip(|tip| tip.select_preset(f64::from(percent)))
        }
        TipCommand::Custom(text) => session.update_tip(|tip| tip.set_custom_text(text)),
        TipCommand::Round(enabled) => {
            session.update_tip(|tip| tip.settings_mut().set_round_to_half(enabled))
        }
    }
    render(session.tip())
}

/// Renders the tip panel.
///
/// ```text
/// Bill 100.00 · Tip [5] 10 (15) 20 custom: - · People 3 · Round to 0.50: off
/// Tip 15.00 │ Total 115.00 │ Each 38.33
/// ```
pub fn render(panel: &TipPanel) -> String {
    let settings = panel.settings();
    let highlighted = settings.highlighted_preset();

    let presets: Vec<String> = TIP_PRESETS
        .iter()
        .map(|&p| {
            if Some(p) == highlighted {
                format!("({p})")
            } else {
                p.to_string()
            }
        })
        .collect();
    let custom = if settings.custom_enabled() {
        format!("({}%)", format_percent(settings.tip_percent()))
    } else {
        "-".to_string()
    };
    let round = if settings.round_to_half() { "on" } else { "off" };

    let breakdown = panel.breakdown();
    format!(
        "Bill {} · Tip {} custom: {} · People {} · Round to 0.50: {}\nTip {} │ Total {} │ Each {}",
        format_amount(panel.base_amount()),
        presets.join(" "),
        custom,
        settings.people(),
        round,
        breakdown.tip_text(),
        breakdown.total_text(),
        breakdown.per_person_text(),
    )
}

fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{percent:.0}")
    } else {
        percent.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Clipboard;
    use tally_prefs::MemoryStore;

    struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn copy_text(&mut self, _text: &str) -> bool {
            false
        }
    }

    fn session() -> Session {
        Session::new(Box::new(MemoryStore::new()), Box::new(NoClipboard))
    }

    fn run(session: &mut Session, line: &str) -> String {
        let words: Vec<&str> = line.split_whitespace().collect();
        execute(session, TipCommand::parse(&words[1..]).unwrap())
    }

    #[test]
    fn test_parse() {
        assert_eq!(TipCommand::parse(&[]).unwrap(), TipCommand::Open);
        assert_eq!(
            TipCommand::parse(&["people", "+"]).unwrap(),
            TipCommand::People(PeopleChange::Step(1))
        );
        assert_eq!(TipCommand::parse(&["preset", "15%"]).unwrap(), TipCommand::Preset(15));
        assert_eq!(
            TipCommand::parse(&["custom", "12,5"]).unwrap(),
            TipCommand::Custom("12,5".into())
        );
        assert!(matches!(TipCommand::parse(&["preset", "12"]), Err(AppError::Usage(_))));
        assert!(matches!(TipCommand::parse(&["round", "maybe"]), Err(AppError::Usage(_))));
        assert!(matches!(TipCommand::parse(&["people"]), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_split_bill() {
        let mut session = session();
        run(&mut session, "tip bill 100");
        run(&mut session, "tip preset 15");
        let out = run(&mut session, "tip people 3");
        assert!(out.contains("(15)"));
        assert!(out.contains("Tip 15.00 │ Total 115.00 │ Each 38.33"));

        let out = run(&mut session, "tip round on");
        assert!(out.contains("Tip 15.50 │ Total 115.50 │ Each 38.50"));
    }

    #[test]
    fn test_people_clamped() {
        let mut session = session();
        run(&mut session, "tip people 25");
        assert_eq!(session.tip().settings().people(), 10);
        run(&mut session, "tip people +");
        assert_eq!(session.tip().settings().people(), 10);
    }

    #[test]
    fn test_custom_clears_highlight() {
        let mut session = session();
        let out = run(&mut session, "tip custom 15");
        assert!(out.contains("5 10 15 20 custom: (15%)"));
    }

    #[test]
    fn test_close() {
        let mut session = session();
        run(&mut session, "tip");
        assert!(session.tip().is_open());
        assert_eq!(run(&mut session, "tip close"), "Tip panel closed.");
        assert!(!session.tip().is_open());
    }
}
