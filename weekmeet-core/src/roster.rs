//! Roster store: the list of participants.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::calendar::CalendarStore;
use crate::error::{WeekmeetError, WeekmeetResult};
use crate::profile::{self, Profile};
use crate::store::{BlobStore, StoreKey};

/// Profile persistence over the roster blob.
///
/// Same concurrency story as the calendar: mutations serialize behind a
/// process-local lock, and across processes the blob is last write wins.
#[derive(Clone)]
pub struct Roster {
    store: Arc<dyn BlobStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Roster {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Roster {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All profiles, in the order they first joined.
    pub async fn list(&self) -> WeekmeetResult<Vec<Profile>> {
        self.load().await
    }

    /// Case-insensitive, trimmed lookup by display name.
    pub async fn find_by_name(&self, name: &str) -> WeekmeetResult<Option<Profile>> {
        Ok(profile::find_by_name(&self.load().await?, name).cloned())
    }

    /// Insert `profile`, or replace the stored profile with the same id.
    pub async fn upsert(&self, profile: Profile) -> WeekmeetResult<Profile> {
        let _guard = self.write_lock.lock().await;

        let mut profiles = self.load().await?;
        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        self.save(&profiles).await?;

        Ok(profile)
    }

    /// Rename and/or recolor a profile, then rewrite its denormalized
    /// copies in every stored week.
    pub async fn update(
        &self,
        user_id: &str,
        name: &str,
        color: &str,
        calendar: &CalendarStore,
    ) -> WeekmeetResult<Profile> {
        let updated = {
            let _guard = self.write_lock.lock().await;

            let mut profiles = self.load().await?;
            let profile = profiles
                .iter_mut()
                .find(|p| p.id == user_id)
                .ok_or_else(|| WeekmeetError::Validation(format!("Unknown userId: {user_id}")))?;

            profile.name = name.to_string();
            profile.color = color.to_string();
            let updated = profile.clone();
            self.save(&profiles).await?;
            updated
        };

        calendar.cascade_rename(user_id, name, color).await?;
        Ok(updated)
    }

    /// Remove a profile and every mark it left on any week.
    ///
    /// Deleting an unknown id still sweeps the calendar, so a retried
    /// delete converges instead of failing.
    pub async fn delete(&self, user_id: &str, calendar: &CalendarStore) -> WeekmeetResult<()> {
        {
            let _guard = self.write_lock.lock().await;

            let mut profiles = self.load().await?;
            profiles.retain(|p| p.id != user_id);
            self.save(&profiles).await?;
        }

        calendar.cascade_delete(user_id).await
    }

    async fn load(&self) -> WeekmeetResult<Vec<Profile>> {
        match self.store.get(StoreKey::Roster).await? {
            Some(blob) => serde_json::from_str(&blob)
                .map_err(|e| WeekmeetError::Serialization(format!("Corrupt roster blob: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, profiles: &[Profile]) -> WeekmeetResult<()> {
        let blob = serde_json::to_string(profiles)
            .map_err(|e| WeekmeetError::Serialization(e.to_string()))?;
        self.store.set(StoreKey::Roster, blob).await
    }
}
