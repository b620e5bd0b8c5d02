use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::mock_behaviour::MockBehaviour;
use crate::remote::{Record, RecordId};
use crate::traits::RecordStore;

/// A [`RecordStore`] that keeps its records in memory.
///
/// Useful offline, and in tests, where its [`MockBehaviour`] can make upserts fail on purpose
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<HashMap<RecordId, Record>>,
    upsert_count: Mutex<usize>,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose upserts obey `mock_behaviour`.
    /// The behaviour is shared, so that a test can tweak it while the store is in use
    pub fn with_behaviour(mock_behaviour: Arc<Mutex<MockBehaviour>>) -> Self {
        Self {
            mock_behaviour: Some(mock_behaviour),
            ..Self::default()
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<Record> {
        lock(&self.records).get(id).cloned()
    }

    /// Every stored record, in no particular order
    pub fn records(&self) -> Vec<Record> {
        lock(&self.records).values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.records).is_empty()
    }

    /// How many upserts have been attempted, including failed ones
    pub fn upsert_count(&self) -> usize {
        *lock(&self.upsert_count)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(&self, record: Record) -> Result<RecordId, RemoteError> {
        *lock(&self.upsert_count) += 1;

        if let Some(behaviour) = &self.mock_behaviour {
            lock(behaviour).can_upsert()?;
        }

        let id = record.id().clone();
        lock(&self.records).insert(id.clone(), record);
        Ok(id)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Nothing in here can panic while holding a lock, and the data stays consistent if something else did
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
