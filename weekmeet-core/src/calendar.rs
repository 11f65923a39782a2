//! Calendar store: every stored week behind one blob.
//!
//! The storage shape is deliberately simple: all weeks serialize into a
//! single JSON document, and every mutation is a whole-document
//! read-modify-write. A process-local lock keeps concurrent requests from
//! interleaving those read-modify-writes; across processes, the last
//! writer wins.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{WeekmeetError, WeekmeetResult};
use crate::slot::{self, SlotCoord, SlotEntry, SlotTable, WeekCalendar};
use crate::store::{BlobStore, StoreKey};

#[derive(Clone)]
pub struct CalendarStore {
    store: Arc<dyn BlobStore>,
    write_lock: Arc<Mutex<()>>,
}

impl CalendarStore {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        CalendarStore {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// One week's table. Unknown weeks read as empty rather than erroring.
    pub async fn table(&self, week_key: &str) -> WeekmeetResult<SlotTable> {
        Ok(self.load().await?.remove(week_key).unwrap_or_default())
    }

    /// Every stored week.
    pub async fn all_tables(&self) -> WeekmeetResult<WeekCalendar> {
        self.load().await
    }

    /// Replace one week's table wholesale. The week is created if new and
    /// kept even when `table` is empty.
    pub async fn put_table(&self, week_key: &str, table: SlotTable) -> WeekmeetResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut calendar = self.load().await?;
        calendar.insert(week_key.to_string(), table);
        self.save(&calendar).await
    }

    /// Mark one cell for one participant. Marking an already-marked cell
    /// refreshes the stored name and color, nothing more.
    pub async fn upsert_slot(
        &self,
        week_key: &str,
        coord: SlotCoord,
        entry: SlotEntry,
    ) -> WeekmeetResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut calendar = self.load().await?;
        let table = calendar.entry(week_key.to_string()).or_default();
        slot::upsert_entry(table, coord, entry);
        self.save(&calendar).await
    }

    /// Clear one participant's mark from one cell. Unknown weeks and
    /// untouched slots are no-ops.
    pub async fn remove_slot(
        &self,
        week_key: &str,
        coord: SlotCoord,
        user_id: &str,
    ) -> WeekmeetResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut calendar = self.load().await?;
        let Some(table) = calendar.get_mut(week_key) else {
            return Ok(());
        };
        if !table.contains_key(&coord.key()) {
            return Ok(());
        }

        slot::remove_entry(table, coord, user_id);
        self.save(&calendar).await
    }

    /// Rewrite the denormalized name and color everywhere `user_id`
    /// appears. Skips the write entirely when nothing changed.
    pub async fn cascade_rename(
        &self,
        user_id: &str,
        name: &str,
        color: &str,
    ) -> WeekmeetResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut calendar = self.load().await?;
        if slot::rename_entries(&mut calendar, user_id, name, color) {
            self.save(&calendar).await?;
        }
        Ok(())
    }

    /// Drop every mark `user_id` left, in every week.
    pub async fn cascade_delete(&self, user_id: &str) -> WeekmeetResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut calendar = self.load().await?;
        slot::remove_entries(&mut calendar, user_id);
        self.save(&calendar).await
    }

    async fn load(&self) -> WeekmeetResult<WeekCalendar> {
        match self.store.get(StoreKey::Calendar).await? {
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|e| WeekmeetError::Serialization(format!("Corrupt calendar blob: {e}"))),
            None => Ok(WeekCalendar::new()),
        }
    }

    async fn save(&self, calendar: &WeekCalendar) -> WeekmeetResult<()> {
        let blob = serde_json::to_string(calendar)
            .map_err(|e| WeekmeetError::Serialization(e.to_string()))?;
        self.store.set(StoreKey::Calendar, blob).await
    }
}
