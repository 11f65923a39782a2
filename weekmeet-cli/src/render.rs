//! Terminal rendering: the week grid, the participant legend, spinners.

use chrono::{Datelike, Duration, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Rgb};
use weekmeet_core::profile::Profile;
use weekmeet_core::slot::{DAY_COUNT, DAY_NAMES, SlotEntry, SlotTable, TIME_SLOT_COUNT, time_label};
use weekmeet_core::week;

/// Widest time label, "16:30 - 17:00".
const LABEL_WIDTH: usize = 13;

/// Column width for each day of the grid.
const CELL_WIDTH: usize = 10;

/// Initials shown per cell before collapsing into "+n".
const SHOWN_PER_CELL: usize = 2;

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// "1" -> "1st", "2" -> "2nd", teens always "th".
fn ordinal(day: u32) -> String {
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };

    format!("{day}{suffix}")
}

fn short_date(date: NaiveDate) -> String {
    format!("{} {}", date.format("%b"), ordinal(date.day()))
}

/// Header text for a week, e.g. "Week of Mar 1st - 7th" or, across a month
/// boundary, "Week of Mar 29th - Apr 4th".
pub fn week_range_text(week_start: NaiveDate) -> String {
    let end = week_start + Duration::days(6);

    if week_start.month() == end.month() {
        format!("Week of {} - {}", short_date(week_start), ordinal(end.day()))
    } else {
        format!("Week of {} - {}", short_date(week_start), short_date(end))
    }
}

/// Uppercased initials of the first and last words of a name.
fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let first = words.next().and_then(|w| w.chars().next());
    let last = words.last().and_then(|w| w.chars().next());

    first
        .into_iter()
        .chain(last)
        .flat_map(|c| c.to_uppercase())
        .collect()
}

fn hex_components(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Terminal color for a profile's hex string, white when it is malformed.
pub fn hex_color(hex: &str) -> Rgb {
    match hex_components(hex) {
        Some((r, g, b)) => Rgb(r, g, b),
        None => Rgb(255, 255, 255),
    }
}

/// A cell's text plus its visible width (the text carries ANSI codes, so
/// its len() is useless for alignment).
fn cell_text(entries: &[SlotEntry]) -> (String, usize) {
    let mut pieces = Vec::new();
    let mut visible = 0;

    for entry in entries.iter().take(SHOWN_PER_CELL) {
        let initials = initials(&entry.user_name);
        visible += initials.chars().count();
        pieces.push(initials.color(hex_color(&entry.color)).to_string());
    }

    if entries.len() > SHOWN_PER_CELL {
        let more = format!("+{}", entries.len() - SHOWN_PER_CELL);
        visible += more.chars().count();
        pieces.push(more.dimmed().to_string());
    }

    visible += pieces.len().saturating_sub(1);
    (pieces.join(" "), visible)
}

/// Render one week's grid: a day column per date, a row per half-hour
/// bucket, participant initials in each marked cell.
pub fn render_week(week_start: NaiveDate, table: &SlotTable) -> String {
    let dates = week::week_dates(week_start);
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", week_range_text(week_start).bold()));

    out.push_str(&" ".repeat(LABEL_WIDTH + 2));
    for (day, date) in dates.iter().enumerate() {
        let heading = format!("{} {}", &DAY_NAMES[day][..3], date.day());
        let padding = CELL_WIDTH.saturating_sub(heading.chars().count());
        out.push_str(&heading);
        out.push_str(&" ".repeat(padding));
    }
    out.push('\n');

    for time_index in 0..TIME_SLOT_COUNT {
        out.push_str(&format!(
            "{:>width$}  ",
            time_label(time_index),
            width = LABEL_WIDTH
        ));

        for day in 0..DAY_COUNT {
            let key = format!("{day}-{time_index}");
            let (text, visible) = match table.get(&key) {
                Some(entries) => cell_text(entries),
                None => ("·".dimmed().to_string(), 1),
            };

            out.push_str(&text);
            out.push_str(&" ".repeat(CELL_WIDTH.saturating_sub(visible)));
        }

        out.push('\n');
    }

    out
}

/// One line per participant: a colored dot, the name, the initials that
/// mark them in the grid.
pub fn render_legend(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return format!("{}\n", "No one has joined yet".dimmed());
    }

    let mut out = String::new();
    for profile in profiles {
        out.push_str(&format!(
            "{} {} {}\n",
            "●".color(hex_color(&profile.color)),
            profile.name,
            format!("({})", initials(&profile.name)).dimmed()
        ));
    }

    out
}
