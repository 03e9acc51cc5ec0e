use crate::app::ports::SnapshotSource;
use crate::common::error::{Result, ScraperError};
use crate::domain::RawSnapshot;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// Directory of snapshot files, one JSON document `{url, html}` per page.
///
/// Files written by `put` are named after the SHA-256 of the page URL, so a
/// page crawled twice in one run keeps a single snapshot.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name used for a given page URL
    pub fn snapshot_id(url: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        format!("{}.json", hex::encode(hasher.finalize()))
    }

    pub async fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Remove every stored snapshot and recreate an empty directory.
    pub async fn reset(&self) -> Result<()> {
        if fs::try_exists(&self.root).await? {
            fs::remove_dir_all(&self.root).await?;
        }
        self.ensure().await
    }

    /// Write one snapshot and return its identifier.
    pub async fn put(&self, snapshot: &RawSnapshot) -> Result<String> {
        let id = Self::snapshot_id(&snapshot.url);
        let bytes = serde_json::to_vec(snapshot)?;
        fs::write(self.root.join(&id), bytes).await?;
        debug!(snapshot = %id, url = %snapshot.url, "Stored snapshot");
        Ok(id)
    }
}

#[async_trait]
impl SnapshotSource for FsSnapshotStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn list(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|e| ScraperError::Storage {
            message: format!("cannot list '{}': {}", self.root.display(), e),
        })?;

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                ids.push(name.to_string());
            }
        }
        ids.sort();
        debug!("Listed {} snapshots", ids.len());
        Ok(ids)
    }

    async fn load(&self, id: &str) -> Result<RawSnapshot> {
        let content = fs::read(self.root.join(id)).await?;
        Ok(serde_json::from_slice(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_then_list_and_load() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());

        let id = store
            .put(&RawSnapshot::new("https://yc/acme", "<div></div>"))
            .await
            .unwrap();
        assert_eq!(id, FsSnapshotStore::snapshot_id("https://yc/acme"));
        assert_eq!(id.len(), 64 + ".json".len());

        assert_eq!(store.list().await.unwrap(), vec![id.clone()]);
        let loaded = store.load(&id).await.unwrap();
        assert_eq!(loaded.url, "https://yc/acme");
        assert_eq!(loaded.html.as_deref(), Some("<div></div>"));
    }

    #[tokio::test]
    async fn test_same_url_overwrites() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());
        store.put(&RawSnapshot::new("https://yc/a", "one")).await.unwrap();
        let id = store.put(&RawSnapshot::new("https://yc/a", "two")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(store.load(&id).await.unwrap().html.as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn test_list_skips_directories_and_sorts() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        let store = FsSnapshotStore::new(dir.path());
        assert_eq!(store.list().await.unwrap(), vec!["a.json", "b.json"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_storage_error() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("missing"));
        assert!(matches!(store.list().await, Err(ScraperError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_json_error() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let store = FsSnapshotStore::new(dir.path());
        assert!(matches!(store.load("bad.json").await, Err(ScraperError::Json(_))));
    }

    #[tokio::test]
    async fn test_reset_clears_directory() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("dataset"));
        store.ensure().await.unwrap();
        store.put(&RawSnapshot::new("https://yc/a", "x")).await.unwrap();
        store.reset().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
