//! Flat-file backend: one JSON file per blob under a data directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{BlobStore, StoreKey};
use crate::error::WeekmeetResult;

/// Stores blobs as files, for single-machine deployments with no Redis.
///
/// Writes go through a temp file and rename so a crash mid-write never
/// leaves a torn blob behind.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> WeekmeetResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn blob_path(&self, key: StoreKey) -> PathBuf {
        let file = match key {
            StoreKey::Roster => "users.json",
            StoreKey::Calendar => "calendar.json",
        };
        self.dir.join(file)
    }
}

#[async_trait]
impl BlobStore for FileStore {
    async fn get(&self, key: StoreKey) -> WeekmeetResult<Option<String>> {
        match tokio::fs::read_to_string(self.blob_path(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: StoreKey, value: String) -> WeekmeetResult<()> {
        let path = self.blob_path(key);
        let temp_path = path.with_extension("json.tmp");

        // Write to temp file first, then atomically rename into place
        tokio::fs::write(&temp_path, value).await?;
        tokio::fs::rename(&temp_path, &path).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_blobs_read_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert_eq!(store.get(StoreKey::Calendar).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store
            .set(StoreKey::Roster, r#"[{"id":"a"}]"#.into())
            .await
            .unwrap();

        assert_eq!(
            store.get(StoreKey::Roster).await.unwrap().as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
    }

    #[tokio::test]
    async fn writes_leave_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set(StoreKey::Calendar, "{}".into()).await.unwrap();
        store.set(StoreKey::Calendar, r#"{"a":{}}"#.into()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["calendar.json".to_string()]);
    }

    #[tokio::test]
    async fn creates_missing_data_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("data");

        let store = FileStore::new(&nested).unwrap();
        store.set(StoreKey::Roster, "[]".into()).await.unwrap();

        assert!(nested.join("users.json").exists());
    }
}
