//! Slot grid coordinates, entries, and table operations.
//!
//! A week grid is 7 days (Sunday first) by 18 half-hour buckets running
//! 8:00 through 17:00. Each marked slot holds the participants who marked
//! it, in the order they first did.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{WeekmeetError, WeekmeetResult};
use crate::profile::Profile;

/// Days per week grid.
pub const DAY_COUNT: u8 = 7;

/// Half-hour buckets per day.
pub const TIME_SLOT_COUNT: u8 = 18;

/// Hour the first bucket starts at.
const FIRST_HOUR: u8 = 8;

/// English day names, indexed by day coordinate.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A validated cell position on the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotCoord {
    day: u8,
    time_index: u8,
}

impl SlotCoord {
    pub fn new(day: u8, time_index: u8) -> WeekmeetResult<Self> {
        if day >= DAY_COUNT {
            return Err(WeekmeetError::Validation(format!(
                "Day {day} is out of range (0-{})",
                DAY_COUNT - 1
            )));
        }
        if time_index >= TIME_SLOT_COUNT {
            return Err(WeekmeetError::Validation(format!(
                "Time index {time_index} is out of range (0-{})",
                TIME_SLOT_COUNT - 1
            )));
        }

        Ok(SlotCoord { day, time_index })
    }

    /// For coordinates derived from already-validated ones.
    pub(crate) fn new_unchecked(day: u8, time_index: u8) -> Self {
        debug_assert!(day < DAY_COUNT && time_index < TIME_SLOT_COUNT);
        SlotCoord { day, time_index }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn time_index(&self) -> u8 {
        self.time_index
    }

    /// Composite key used in stored tables: "day-timeIndex".
    pub fn key(&self) -> String {
        format!("{}-{}", self.day, self.time_index)
    }

    /// Parses a composite key back into a coordinate.
    pub fn parse_key(key: &str) -> WeekmeetResult<Self> {
        let invalid =
            || WeekmeetError::Validation(format!("Invalid slot key '{key}': expected day-timeIndex"));

        let (day, time_index) = key.split_once('-').ok_or_else(invalid)?;
        let day: u8 = day.parse().map_err(|_| invalid())?;
        let time_index: u8 = time_index.parse().map_err(|_| invalid())?;

        Self::new(day, time_index)
    }

    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[self.day as usize]
    }

    /// Human label for this cell's time bucket, e.g. "8:00 - 8:30".
    pub fn time_label(&self) -> String {
        time_label(self.time_index)
    }
}

/// Label for a time bucket, e.g. index 0 is "8:00 - 8:30".
pub fn time_label(time_index: u8) -> String {
    let (start_hour, start_min) = bucket_time(time_index);
    let (end_hour, end_min) = bucket_time(time_index + 1);
    format!("{start_hour}:{start_min:02} - {end_hour}:{end_min:02}")
}

fn bucket_time(index: u8) -> (u8, u8) {
    (FIRST_HOUR + index / 2, (index % 2) * 30)
}

/// One participant's mark on one slot: a denormalized profile snapshot.
///
/// The name and color captured here are what renders in the grid, which is
/// why profile updates and deletes cascade through every stored week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotEntry {
    pub user_id: String,
    pub user_name: String,
    pub color: String,
}

impl SlotEntry {
    pub fn from_profile(profile: &Profile) -> Self {
        SlotEntry {
            user_id: profile.id.clone(),
            user_name: profile.name.clone(),
            color: profile.color.clone(),
        }
    }
}

/// All marks for one week, keyed by composite slot key.
pub type SlotTable = BTreeMap<String, Vec<SlotEntry>>;

/// Every stored week, keyed by week key.
pub type WeekCalendar = BTreeMap<String, SlotTable>;

/// Add or refresh `entry` at `coord`.
///
/// A participant appears at most once per slot: an existing entry with the
/// same userId is overwritten in place, keeping its position in the list;
/// anyone new is appended.
pub fn upsert_entry(table: &mut SlotTable, coord: SlotCoord, entry: SlotEntry) {
    let entries = table.entry(coord.key()).or_default();

    match entries.iter_mut().find(|e| e.user_id == entry.user_id) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

/// Remove `user_id`'s mark at `coord`, if present.
///
/// Slot keys never hold empty lists: removing the last entry removes the
/// key itself. Removing an absent mark is a no-op.
pub fn remove_entry(table: &mut SlotTable, coord: SlotCoord, user_id: &str) {
    let key = coord.key();
    let Some(entries) = table.get_mut(&key) else {
        return;
    };

    entries.retain(|e| e.user_id != user_id);
    if entries.is_empty() {
        table.remove(&key);
    }
}

/// Rewrite the name and color on every entry `user_id` left anywhere in the
/// calendar, preserving slot membership and order. Returns whether anything
/// actually changed, so callers can skip the write-back when nothing did.
pub fn rename_entries(
    calendar: &mut WeekCalendar,
    user_id: &str,
    name: &str,
    color: &str,
) -> bool {
    let mut changed = false;

    for table in calendar.values_mut() {
        for entries in table.values_mut() {
            for entry in entries.iter_mut().filter(|e| e.user_id == user_id) {
                if entry.user_name != name || entry.color != color {
                    entry.user_name = name.to_string();
                    entry.color = color.to_string();
                    changed = true;
                }
            }
        }
    }

    changed
}

/// Remove every entry `user_id` left anywhere in the calendar, dropping slot
/// keys that empty out. Weeks themselves stay, even when emptied.
pub fn remove_entries(calendar: &mut WeekCalendar, user_id: &str) {
    for table in calendar.values_mut() {
        table.retain(|_, entries| {
            entries.retain(|e| e.user_id != user_id);
            !entries.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, color: &str) -> SlotEntry {
        SlotEntry {
            user_id: id.into(),
            user_name: name.into(),
            color: color.into(),
        }
    }

    fn coord(day: u8, time_index: u8) -> SlotCoord {
        SlotCoord::new(day, time_index).unwrap()
    }

    #[test]
    fn coords_reject_out_of_range_values() {
        assert!(SlotCoord::new(7, 0).is_err());
        assert!(SlotCoord::new(0, 18).is_err());
        assert!(SlotCoord::new(6, 17).is_ok());
    }

    #[test]
    fn keys_round_trip() {
        let c = coord(2, 15);
        assert_eq!(c.key(), "2-15");
        assert_eq!(SlotCoord::parse_key("2-15").unwrap(), c);
    }

    #[test]
    fn parse_key_rejects_malformed_keys() {
        assert!(SlotCoord::parse_key("2").is_err());
        assert!(SlotCoord::parse_key("a-b").is_err());
        assert!(SlotCoord::parse_key("2-18").is_err());
        assert!(SlotCoord::parse_key("-1-3").is_err());
    }

    #[test]
    fn time_labels_match_half_hour_buckets() {
        assert_eq!(time_label(0), "8:00 - 8:30");
        assert_eq!(time_label(1), "8:30 - 9:00");
        assert_eq!(time_label(9), "12:30 - 13:00");
        assert_eq!(time_label(17), "16:30 - 17:00");
    }

    #[test]
    fn day_names_line_up_with_coordinates() {
        assert_eq!(coord(0, 0).day_name(), "Sunday");
        assert_eq!(coord(6, 0).day_name(), "Saturday");
    }

    #[test]
    fn upsert_appends_new_participants_in_arrival_order() {
        let mut table = SlotTable::new();
        upsert_entry(&mut table, coord(1, 4), entry("a", "Ana", "#ef4444"));
        upsert_entry(&mut table, coord(1, 4), entry("b", "Bo", "#3b82f6"));

        let entries = &table["1-4"];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user_id, "a");
        assert_eq!(entries[1].user_id, "b");
    }

    #[test]
    fn upsert_overwrites_in_place_keeping_position() {
        let mut table = SlotTable::new();
        upsert_entry(&mut table, coord(1, 4), entry("a", "Ana", "#ef4444"));
        upsert_entry(&mut table, coord(1, 4), entry("b", "Bo", "#3b82f6"));
        upsert_entry(&mut table, coord(1, 4), entry("a", "Ana B", "#22c55e"));

        let entries = &table["1-4"];
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].user_id, "a");
        assert_eq!(entries[0].user_name, "Ana B");
        assert_eq!(entries[0].color, "#22c55e");
    }

    #[test]
    fn remove_of_absent_mark_is_a_noop() {
        let mut table = SlotTable::new();
        upsert_entry(&mut table, coord(1, 4), entry("a", "Ana", "#ef4444"));

        remove_entry(&mut table, coord(1, 4), "ghost");
        remove_entry(&mut table, coord(2, 4), "a");

        assert_eq!(table["1-4"].len(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn removing_the_last_entry_drops_the_key() {
        let mut table = SlotTable::new();
        upsert_entry(&mut table, coord(1, 4), entry("a", "Ana", "#ef4444"));
        upsert_entry(&mut table, coord(1, 4), entry("b", "Bo", "#3b82f6"));

        remove_entry(&mut table, coord(1, 4), "a");
        assert_eq!(table["1-4"].len(), 1);

        remove_entry(&mut table, coord(1, 4), "b");
        assert!(!table.contains_key("1-4"));
    }

    #[test]
    fn rename_touches_only_the_target_user_across_weeks() {
        let mut calendar = WeekCalendar::new();
        let week1 = calendar.entry("2024-03-03".into()).or_default();
        upsert_entry(week1, coord(0, 0), entry("a", "Ana", "#ef4444"));
        upsert_entry(week1, coord(0, 0), entry("b", "Bo", "#3b82f6"));
        let week2 = calendar.entry("2024-03-10".into()).or_default();
        upsert_entry(week2, coord(3, 9), entry("a", "Ana", "#ef4444"));

        let changed = rename_entries(&mut calendar, "a", "Ana B", "#22c55e");
        assert!(changed);

        let week1 = &calendar["2024-03-03"]["0-0"];
        assert_eq!(week1[0].user_name, "Ana B");
        assert_eq!(week1[1].user_name, "Bo");
        assert_eq!(calendar["2024-03-10"]["3-9"][0].color, "#22c55e");
    }

    #[test]
    fn rename_reports_when_nothing_changed() {
        let mut calendar = WeekCalendar::new();
        let week = calendar.entry("2024-03-03".into()).or_default();
        upsert_entry(week, coord(0, 0), entry("a", "Ana", "#ef4444"));

        assert!(!rename_entries(&mut calendar, "a", "Ana", "#ef4444"));
        assert!(!rename_entries(&mut calendar, "ghost", "Who", "#000000"));
    }

    #[test]
    fn remove_entries_sweeps_every_week_and_drops_empty_keys() {
        let mut calendar = WeekCalendar::new();
        let week1 = calendar.entry("2024-03-03".into()).or_default();
        upsert_entry(week1, coord(0, 0), entry("a", "Ana", "#ef4444"));
        upsert_entry(week1, coord(0, 1), entry("a", "Ana", "#ef4444"));
        upsert_entry(week1, coord(0, 1), entry("b", "Bo", "#3b82f6"));
        let week2 = calendar.entry("2024-03-10".into()).or_default();
        upsert_entry(week2, coord(5, 9), entry("a", "Ana", "#ef4444"));

        remove_entries(&mut calendar, "a");

        let week1 = &calendar["2024-03-03"];
        assert!(!week1.contains_key("0-0"));
        assert_eq!(week1["0-1"].len(), 1);
        assert_eq!(week1["0-1"][0].user_id, "b");

        // The emptied week stays, with no lingering keys
        let week2 = &calendar["2024-03-10"];
        assert!(week2.is_empty());
    }
}
