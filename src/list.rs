//! Named groups of tasks

use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;
use crate::task::{Task, TaskId};

/// A named list of tasks, displayed with an icon.
///
/// A list only references its tasks by id. Tasks themselves are owned by the [`AppState`](crate::state::AppState),
/// and removing a task does not update the lists that referenced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    name: String,
    symbol: Symbol,
    #[serde(default)]
    task_ids: Vec<TaskId>,
}

impl TaskList {
    /// Create an empty list
    pub fn new(name: String, symbol: Symbol) -> Self {
        Self {
            name,
            symbol,
            task_ids: Vec::new(),
        }
    }

    pub fn name(&self) -> &str           { &self.name     }
    pub fn symbol(&self) -> &Symbol      { &self.symbol   }
    pub fn task_ids(&self) -> &[TaskId]  { &self.task_ids }

    pub fn rename(&mut self, new_name: String) {
        self.name = new_name;
    }

    pub fn set_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
    }

    /// Append a task to this list.
    /// Returns `false` if it was already there
    pub fn add_task(&mut self, id: TaskId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.task_ids.push(id);
        true
    }

    /// Returns `false` if the task was not in this list
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let len_before = self.task_ids.len();
        self.task_ids.retain(|t| *t != id);
        self.task_ids.len() != len_before
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.task_ids.contains(&id)
    }

    /// Resolve the tasks of this list among `all_tasks`, in list order.
    /// Ids that do not match any task are skipped
    pub fn tasks<'a>(&self, all_tasks: &'a [Task]) -> Vec<&'a Task> {
        self.task_ids.iter()
            .filter_map(|id| all_tasks.iter().find(|t| t.id() == *id))
            .collect()
    }
}
