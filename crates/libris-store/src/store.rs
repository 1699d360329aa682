//! The record store seam.
//!
//! Collections cross this boundary as `serde_json::Value` arrays so the
//! trait stays object-safe; the typed [`load`]/[`save`] helpers convert
//! at the edge. Handlers hold an `Arc<dyn RecordStore>` and tests swap
//! in [`crate::MemoryStore`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// The entity kinds Libris persists, one JSON array file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Registered user accounts.
    Users,
    /// The book catalog.
    Books,
}

impl EntityKind {
    /// File name backing this collection.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Users => "users.json",
            Self::Books => "books.json",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::Books => write!(f, "books"),
        }
    }
}

/// Load/save of a named entity collection.
///
/// Implementations must treat an absent or unreadable collection as
/// empty on `read` and must replace the entire collection on `write`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Reads the full collection for `kind`.
    async fn read(&self, kind: EntityKind) -> Result<Vec<Value>>;

    /// Replaces the full collection for `kind`.
    async fn write(&self, kind: EntityKind, records: Vec<Value>) -> Result<()>;
}

/// Loads a collection and deserializes each record.
///
/// Records that fail to deserialize are dropped with a warning rather
/// than failing the whole load, matching the availability-first
/// behavior of the raw store.
pub async fn load<T: DeserializeOwned>(
    store: &(impl RecordStore + ?Sized),
    kind: EntityKind,
) -> Result<Vec<T>> {
    let raw = store.read(kind).await?;
    let mut records = Vec::with_capacity(raw.len());
    for value in raw {
        match serde_json::from_value(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(collection = %kind, error = %e, "Dropping undecodable record");
            }
        }
    }
    Ok(records)
}

/// Serializes and persists a full collection.
pub async fn save<T: Serialize>(
    store: &(impl RecordStore + ?Sized),
    kind: EntityKind,
    records: &[T],
) -> Result<()> {
    let raw = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    store.write(kind, raw).await
}
