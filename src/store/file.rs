use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{ConfigStore, StoreError};
use crate::config::models::RawDocument;

/// File-backed config store. A missing file loads as the empty document;
/// persistence replaces the file atomically (temp file + rename) so a crash
/// mid-write never leaves a truncated document behind.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfigStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn fetch(&self) -> Result<RawDocument, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No persisted configuration, using the empty document.");
                Ok(RawDocument::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, document: &RawDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document)?;
        let path = self.path.clone();

        let result = tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir)?;
            let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
            tmp.write_all(&bytes)?;
            tmp.persist(&path).map_err(|err| StoreError::Io(err.error))?;
            Ok(())
        })
        .await;

        match result {
            Ok(inner) => inner,
            Err(join_err) => Err(StoreError::Io(std::io::Error::other(join_err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::models::{ChannelType, RawDestination};

    #[tokio::test]
    async fn missing_file_loads_as_the_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("config.json"));

        let document = store.fetch().await.unwrap();

        assert_eq!(document, RawDocument::default());
    }

    #[tokio::test]
    async fn persist_then_fetch_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("config.json"));

        let document = RawDocument {
            destinations: vec![RawDestination {
                name: ChannelType::Webhook,
                enabled: true,
                url: "https://example.com/hook".to_string(),
            }],
            ..RawDocument::default()
        };

        store.persist(&document).await.unwrap();
        let loaded = store.fetch().await.unwrap();

        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn persist_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("nested/data/config.json"));

        store.persist(&RawDocument::default()).await.unwrap();

        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();
        let store = FileConfigStore::new(&path);

        let err = store.fetch().await.unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
