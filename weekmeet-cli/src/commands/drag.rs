//! Rectangle mark/unmark gestures driven from the command line.
//!
//! A gesture presses at one cell, sweeps to the opposite corner, and
//! releases: the press decides select vs deselect from the starting cell's
//! current state, and the whole rectangle gets the same action.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use weekmeet_core::config::WeekmeetConfig;
use weekmeet_core::profile::Profile;
use weekmeet_core::selection::{DragSelection, SlotAction};
use weekmeet_core::slot::{DAY_NAMES, SlotCoord, SlotTable};
use weekmeet_core::week;

use crate::client::Client;
use crate::commands::resolve_week_start;
use crate::render;
use crate::session;

/// Parse a cell argument like `tue-3` or `2-15`.
pub fn parse_cell(arg: &str) -> Result<SlotCoord> {
    let (day, time) = arg
        .split_once('-')
        .with_context(|| format!("Invalid cell '{arg}': expected DAY-TIME, e.g. tue-3"))?;

    let day = day_index(day)
        .with_context(|| format!("Invalid day '{day}': expected 0-6 or a day name like tue"))?;
    let time_index: u8 = time
        .parse()
        .with_context(|| format!("Invalid time index '{time}': expected 0-17"))?;

    Ok(SlotCoord::new(day, time_index)?)
}

/// Day coordinate from a number or a day-name prefix. Prefix matching takes
/// the first hit in day order: `t` is Tuesday, `th` Thursday.
fn day_index(day: &str) -> Option<u8> {
    if let Ok(index) = day.parse::<u8>() {
        return Some(index);
    }

    let lower = day.to_lowercase();
    if lower.is_empty() {
        return None;
    }

    DAY_NAMES
        .iter()
        .position(|name| name.to_lowercase().starts_with(&lower))
        .map(|i| i as u8)
}

/// What a finished gesture did, plus the week as the server now holds it.
pub struct GestureOutcome {
    pub action: SlotAction,
    pub updated: usize,
    pub failed: usize,
    pub first_error: Option<String>,
    pub table: SlotTable,
}

impl GestureOutcome {
    pub fn summary(&self) -> String {
        let verb = match self.action {
            SlotAction::Select => "Marked",
            SlotAction::Deselect => "Cleared",
        };
        let slots = if self.updated == 1 { "slot" } else { "slots" };
        let mut text = format!("{verb} {} {slots}", self.updated);

        if self.failed > 0 {
            let detail = self.first_error.as_deref().unwrap_or("unknown error");
            let failures = format!(", {} failed: {detail}", self.failed);
            text.push_str(&failures.red().to_string());
        }

        text
    }
}

/// Run one gesture against `week_key` and reconcile with the server.
pub async fn run_gesture(
    client: &Client,
    profile: &Profile,
    week_key: &str,
    from: &str,
    to: Option<&str>,
) -> Result<GestureOutcome> {
    let from = parse_cell(from)?;
    let to = match to {
        Some(arg) => parse_cell(arg)?,
        None => from,
    };

    let spinner = render::create_spinner(format!("Sweeping {week_key}"));
    let outcome = sweep(client, profile, week_key, from, to).await;
    spinner.finish_and_clear();

    outcome
}

async fn sweep(
    client: &Client,
    profile: &Profile,
    week_key: &str,
    from: SlotCoord,
    to: SlotCoord,
) -> Result<GestureOutcome> {
    let table = client.week_table(week_key).await?;

    // The press decides select vs deselect from the starting cell
    let already_marked = table
        .get(&from.key())
        .is_some_and(|entries| entries.iter().any(|e| e.user_id == profile.id));

    let mut drag = DragSelection::new();
    drag.press(from, already_marked);
    drag.move_to(to);
    let (action, cells) = drag.release().context("No gesture in progress")?;
    let is_selected = action == SlotAction::Select;

    // One idempotent call per covered cell
    let mut updated = 0;
    let mut failed = 0;
    let mut first_error = None;
    for coord in cells {
        match client
            .update_slot(week_key, coord, profile, is_selected)
            .await
        {
            Ok(()) => updated += 1,
            Err(e) => {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(e.to_string());
                }
            }
        }
    }

    // Reconcile with whatever the server now holds, even after failures
    let table = client.week_table(week_key).await?;

    Ok(GestureOutcome {
        action,
        updated,
        failed,
        first_error,
        table,
    })
}

pub async fn run(from: &str, to: Option<&str>, week_arg: Option<&str>) -> Result<()> {
    let profile = session::require()?;
    let week_start = resolve_week_start(week_arg)?;
    let week_key = week::week_key(week_start);

    let config = WeekmeetConfig::load()?;
    let client = Client::from_config(&config);

    let outcome = run_gesture(&client, &profile, &week_key, from, to).await?;

    print!("{}", render::render_week(week_start, &outcome.table));
    println!();
    println!("{}", outcome.summary());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_parse_from_numbers_and_day_names() {
        assert_eq!(parse_cell("2-15").unwrap(), SlotCoord::new(2, 15).unwrap());
        assert_eq!(parse_cell("tue-3").unwrap(), SlotCoord::new(2, 3).unwrap());
        assert_eq!(
            parse_cell("Wednesday-0").unwrap(),
            SlotCoord::new(3, 0).unwrap()
        );
    }

    #[test]
    fn day_prefixes_take_the_first_match() {
        assert_eq!(day_index("s"), Some(0));
        assert_eq!(day_index("sat"), Some(6));
        assert_eq!(day_index("t"), Some(2));
        assert_eq!(day_index("th"), Some(4));
        assert_eq!(day_index("xyz"), None);
    }

    #[test]
    fn malformed_cells_are_rejected() {
        assert!(parse_cell("tue").is_err());
        assert!(parse_cell("tue-99").is_err());
        assert!(parse_cell("9-0").is_err());
        assert!(parse_cell("xyz-3").is_err());
        assert!(parse_cell("-1-3").is_err());
    }
}
