//! In-memory record store for tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::store::{EntityKind, RecordStore};
use crate::Result;

/// In-memory [`RecordStore`] with the same whole-collection contract
/// as [`crate::FileStore`], for unit and integration tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<EntityKind, Vec<Value>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read(&self, kind: EntityKind) -> Result<Vec<Value>> {
        Ok(self
            .collections
            .read()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    async fn write(&self, kind: EntityKind, records: Vec<Value>) -> Result<()> {
        self.collections.write().insert(kind, records);
        Ok(())
    }
}
