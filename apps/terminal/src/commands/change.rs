//! # Change Commands
//!
//! ## Paying in Two Currencies
//! ```text
//! change price 10           price 10.00 EUR
//! change currency paid BGN  customer pays in leva...
//! change split on           ...and hands over some euro as well
//! change also 5             5.00 EUR on top
//! change                    Change: €... / Remaining: €...
//! ```

use tally_core::money::format_amount;
use tally_core::{parse_money, ChangePanel, Currency};

use crate::config::parse_switch;
use crate::error::{AppError, AppResult};
use crate::state::Session;

const USAGE: &str = "change [show|price <amount>|paid <amount>|also <amount>|sync|split [on|off]|currency <price|paid|out> <EUR|BGN>]";

/// Which currency selector `change currency` sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySlot {
    Price,
    Paid,
    Output,
}

/// A parsed `change ...` line.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeCommand {
    Show,
    Price(String),
    Paid(String),
    Also(String),
    Sync,
    Split(Option<bool>),
    Currency(CurrencySlot, Currency),
}

impl ChangeCommand {
    /// Parses the words after `change`.
    pub fn parse(args: &[&str]) -> AppResult<Self> {
        let usage = || AppError::Usage(USAGE);
        let rest = || args[1..].join(" ");

        let Some(&sub) = args.first() else {
            return Ok(ChangeCommand::Show);
        };

        match sub.to_lowercase().as_str() {
            "show" => Ok(ChangeCommand::Show),
            "price" if args.len() > 1 => Ok(ChangeCommand::Price(rest())),
            "paid" if args.len() > 1 => Ok(ChangeCommand::Paid(rest())),
            "also" if args.len() > 1 => Ok(ChangeCommand::Also(rest())),
            "sync" => Ok(ChangeCommand::Sync),
            "split" => match args.get(1) {
                None => Ok(ChangeCommand::Split(None)),
                Some(value) => parse_switch(value)
                    .map(|on| ChangeCommand::Split(Some(on)))
                    .ok_or_else(usage),
            },
            "currency" => {
                let (Some(slot), Some(code)) = (args.get(1), args.get(2)) else {
                    return Err(usage());
                };
                let slot = match slot.to_lowercase().as_str() {
                    "price" => CurrencySlot::Price,
                    "paid" => CurrencySlot::Paid,
                    "out" | "output" => CurrencySlot::Output,
                    _ => return Err(usage()),
                };
                Ok(ChangeCommand::Currency(slot, code.parse()?))
            }
            _ => Err(usage()),
        }
    }
}

/// Runs a change command and renders the panel.
pub fn execute(session: &mut Session, command: ChangeCommand) -> String {
    match command {
        ChangeCommand::Show => {}
        ChangeCommand::Price(text) => session.update_change(|c| c.set_price_text(text)),
        ChangeCommand::Paid(text) => session.update_change(|c| c.set_paid_text(text)),
        ChangeCommand::Also(text) => session.update_change(|c| c.set_paid_secondary_text(text)),
        ChangeCommand::Sync => {
            if !session.sync_paid() {
                return "Cannot sync while the display shows Error.".to_string();
            }
        }
        ChangeCommand::Split(None) => session.update_change(ChangePanel::toggle_split),
        ChangeCommand::Split(Some(on)) => session.update_change(|c| c.set_split_enabled(on)),
        ChangeCommand::Currency(slot, currency) => session.update_change(|c| match slot {
            CurrencySlot::Price => c.set_price_currency(currency),
            CurrencySlot::Paid => c.set_paid_currency(currency),
            CurrencySlot::Output => c.set_output_currency(currency),
        }),
    }
    render(session.change())
}

/// Renders the change panel.
///
/// ```text
/// Price 10.00 EUR · Paid 20.00 EUR (follows calculator)
/// Change: €10.00 (price €10.00, paid €20.00)
/// ```
pub fn render(panel: &ChangePanel) -> String {
    let settings = panel.settings();
    let inputs = panel.inputs();
    let follow = if panel.is_paid_locked() {
        "locked, 'change sync' to follow"
    } else {
        "follows calculator"
    };

    let mut first = format!(
        "Price {} {} · Paid {} {} ({})",
        format_amount(inputs.price),
        settings.price_currency,
        format_amount(inputs.paid_primary),
        settings.paid_currency,
        follow,
    );
    if settings.split_enabled {
        first.push_str(&format!(
            " + {} {}",
            format_amount(parse_money(panel.paid_secondary_text())),
            settings.secondary_currency(),
        ));
    }

    let result = panel.breakdown();
    format!(
        "{first}\n{}: {} (price {}, paid {})",
        result.label,
        result.amount_text(),
        result.price_text(),
        result.paid_text(),
    )
}
