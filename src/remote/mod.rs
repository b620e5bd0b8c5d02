//! This module pushes tasks to a remote [`RecordStore`]
//!
//! Pushing a task is best-effort: failures are logged, and never retried nor reported to the caller.
//! Nothing keeps the remote records consistent with the local [`Cache`](crate::cache::Cache).

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::task::JoinHandle;

use crate::task::{Task, TaskId};
use crate::traits::RecordStore;

mod http_store;
pub use http_store::HttpRecordStore;
mod memory_store;
pub use memory_store::MemoryRecordStore;


/// Identifies a record in a [`RecordStore`]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId {
    content: String,
}

impl RecordId {
    /// The id a task is stored under.
    /// Deriving it from the task id makes every push of the same task replace the same remote record
    pub fn for_task(record_type: &str, task_id: TaskId) -> Self {
        Self { content: format!("{}-{}", record_type, task_id) }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for RecordId {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}


/// A flat record, as sent to a [`RecordStore`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    record_type: String,
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Build the record of a task, using the configured [`RECORD_TYPE`](crate::config::RECORD_TYPE)
    pub fn from_task(task: &Task) -> Self {
        Self::from_task_with_type(task, crate::config::record_type())
    }

    pub fn from_task_with_type(task: &Task, record_type: String) -> Self {
        let mut fields = Map::new();
        fields.insert("id".to_string(), Value::from(task.id()));
        fields.insert("timeframe".to_string(), Value::from(task.timeframe().as_str()));
        fields.insert("text".to_string(), Value::from(task.text()));
        fields.insert("details".to_string(), Value::from(task.details()));
        fields.insert("completed".to_string(), Value::from(task.completed()));

        Self {
            id: RecordId::for_task(&record_type, task.id()),
            record_type,
            fields,
        }
    }

    pub fn record_type(&self) -> &str               { &self.record_type }
    pub fn id(&self) -> &RecordId                   { &self.id          }
    pub fn fields(&self) -> &Map<String, Value>     { &self.fields      }

    /// Decode the task this record has been built from
    pub fn to_task(&self) -> Result<Task, serde_json::Error> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}


/// Pushes single tasks to a remote store, in the background
#[derive(Clone)]
pub struct RemoteSync {
    store: Arc<dyn RecordStore>,
}

impl RemoteSync {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Spawn an upsert of `task` on the current tokio runtime.
    ///
    /// The outcome is only logged. The returned handle can be dropped, or awaited to know when the upsert is over
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime
    pub fn push(&self, task: &Task) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let record = Record::from_task(task);

        tokio::spawn(async move {
            let record_id = record.id().clone();
            log::debug!("Pushing record {}", record_id);
            match store.upsert(record).await {
                Ok(stored_id) => log::info!("Record {} saved successfully.", stored_id),
                Err(err) => log::warn!("Unable to save record {}: {}", record_id, err),
            }
        })
    }
}

impl std::fmt::Debug for RemoteSync {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSync").finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Timeframe;

    #[test]
    fn record_of_a_task() {
        let mut task = Task::new(12, "Renew passport".to_string(), Some("photo booth first".to_string()), Timeframe::EndOfMonth);
        task.toggle_completion();

        let record = Record::from_task_with_type(&task, "task".to_string());
        assert_eq!(record.record_type(), "task");
        assert_eq!(record.id().as_str(), "task-12");
        assert_eq!(Value::Object(record.fields().clone()), serde_json::json!({
            "id": 12,
            "timeframe": "endOfMonth",
            "text": "Renew passport",
            "details": "photo booth first",
            "completed": true,
        }));

        assert_eq!(record.to_task().unwrap(), task);
    }

    #[test]
    fn record_ids_follow_task_ids() {
        let a = Task::new(1, "a".to_string(), None, Timeframe::Today);
        let mut a_toggled = a.clone();
        a_toggled.toggle_completion();
        let b = Task::new(2, "a".to_string(), None, Timeframe::Today);

        assert_eq!(Record::from_task(&a).id(), Record::from_task(&a_toggled).id());
        assert!(Record::from_task(&a).id() != Record::from_task(&b).id());
    }
}
