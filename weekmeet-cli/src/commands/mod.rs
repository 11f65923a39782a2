pub mod delete;
pub mod drag;
pub mod profile;
pub mod roster;
pub mod show;
pub mod signout;
pub mod weeks;
pub mod whoami;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use weekmeet_core::week;

/// Resolve an optional week argument to its canonical week start.
///
/// Accepts any date inside the target week; defaults to the current local
/// week when no argument is given.
pub fn resolve_week_start(arg: Option<&str>) -> Result<NaiveDate> {
    let date = match arg {
        Some(key) => week::parse_week_key(key)?,
        None => Local::now().date_naive(),
    };

    Ok(week::week_start_of(date))
}
