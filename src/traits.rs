use async_trait::async_trait;

use crate::error::RemoteError;
use crate::remote::{Record, RecordId};

/// A remote store of records, private to the current user
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the record, or replace the existing record that has the same [`RecordId`].
    /// Returns the id the record has been stored under
    async fn upsert(&self, record: Record) -> Result<RecordId, RemoteError>;
}
