//! JSON-file backed record store.

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::store::{EntityKind, RecordStore};
use crate::Result;

/// Outcome of parsing raw collection file content.
#[derive(Debug)]
enum ParseOutcome {
    /// The file held a valid JSON array.
    Parsed(Vec<Value>),
    /// The content was blank or malformed; the collection is treated
    /// as empty and the prior content is discarded on the next write.
    Recovered(String),
}

/// Safe-parse with fallback: blank or malformed content becomes an
/// empty collection instead of an error.
fn parse_collection(raw: &str) -> ParseOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ParseOutcome::Recovered("empty file".to_string());
    }
    match serde_json::from_str::<Vec<Value>>(trimmed) {
        Ok(records) => ParseOutcome::Parsed(records),
        Err(e) => ParseOutcome::Recovered(e.to_string()),
    }
}

/// Record store persisting each collection as one pretty-printed JSON
/// array file under a data directory.
///
/// Writes replace the whole file in place. There is no locking and no
/// atomic rename; a crash mid-write can leave the file truncated, and
/// the next read will recover it as an empty collection.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`. The directory is created
    /// lazily on first access.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The directory holding the collection files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Idempotent directory creation, performed before every read and
    /// write so a deleted data directory comes back on demand.
    async fn ensure_data_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn read(&self, kind: EntityKind) -> Result<Vec<Value>> {
        self.ensure_data_dir().await?;
        let path = self.path_for(kind);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First access: persist an empty collection so the
                // file exists from here on.
                self.write(kind, Vec::new()).await?;
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(
                    collection = %kind,
                    error = %e,
                    "Error reading collection file, returning empty collection"
                );
                return Ok(Vec::new());
            }
        };

        match parse_collection(&raw) {
            ParseOutcome::Parsed(records) => Ok(records),
            ParseOutcome::Recovered(cause) => {
                tracing::warn!(
                    collection = %kind,
                    cause = %cause,
                    "JSON parse error, returning empty collection"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn write(&self, kind: EntityKind, records: Vec<Value>) -> Result<()> {
        self.ensure_data_dir().await?;
        let path = self.path_for(kind);

        let json = serde_json::to_vec_pretty(&records)?;
        if let Err(e) = fs::write(&path, json).await {
            tracing::error!(collection = %kind, error = %e, "Error writing collection file");
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[tokio::test]
    async fn missing_file_reads_empty_and_creates_file() {
        let (_dir, store) = store();

        let records = store.read(EntityKind::Books).await.unwrap();
        assert!(records.is_empty());

        // The read itself must have materialized an empty array file.
        let path = store.data_dir().join("books.json");
        let raw = std::fs::read_to_string(path).unwrap();
        assert_eq!(serde_json::from_str::<Vec<Value>>(&raw).unwrap(), Vec::<Value>::new());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let (_dir, store) = store();

        let records = vec![json!({"id": "1", "title": "Dune"})];
        store
            .write(EntityKind::Books, records.clone())
            .await
            .unwrap();

        let loaded = store.read(EntityKind::Books).await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn corrupt_file_recovers_as_empty() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.data_dir()).unwrap();
        std::fs::write(store.data_dir().join("users.json"), "{not json!").unwrap();

        let records = store.read(EntityKind::Users).await.unwrap();
        assert!(records.is_empty());

        // The corrupt content is discarded by the next write.
        store.write(EntityKind::Users, Vec::new()).await.unwrap();
        let raw = std::fs::read_to_string(store.data_dir().join("users.json")).unwrap();
        assert_eq!(serde_json::from_str::<Vec<Value>>(&raw).unwrap(), Vec::<Value>::new());
    }

    #[tokio::test]
    async fn blank_file_reads_empty() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.data_dir()).unwrap();
        std::fs::write(store.data_dir().join("books.json"), "   \n").unwrap();

        let records = store.read(EntityKind::Books).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn write_is_pretty_printed() {
        let (_dir, store) = store();
        store
            .write(EntityKind::Books, vec![json!({"id": "1"})])
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.data_dir().join("books.json")).unwrap();
        assert!(raw.contains('\n'), "collection files are pretty-printed");
    }

    #[test]
    fn parse_outcomes() {
        assert!(matches!(parse_collection("[]"), ParseOutcome::Parsed(v) if v.is_empty()));
        assert!(matches!(parse_collection(""), ParseOutcome::Recovered(_)));
        assert!(matches!(parse_collection("  "), ParseOutcome::Recovered(_)));
        assert!(matches!(parse_collection("{]"), ParseOutcome::Recovered(_)));
    }
}
