//! This module ties the local cache, the in-memory state and the remote store together
//!
//! The expected flow is:
//! * [`TaskManager::load`] once on startup,
//! * any number of mutations (each toggle is also pushed to the remote store, if any),
//! * [`TaskManager::save`] whenever the application goes to the background.

use tokio::task::JoinHandle;

use crate::cache::Cache;
use crate::error::StoreError;
use crate::list::TaskList;
use crate::remote::RemoteSync;
use crate::state::AppState;
use crate::symbol::Symbol;
use crate::task::{Task, TaskId, Timeframe};

/// The outcome of [`TaskManager::toggle_completion`]
#[derive(Debug)]
pub struct Toggled {
    /// The task, as updated
    pub task: Task,
    /// The pending push to the remote store, if a remote store is configured.
    /// Dropping it does not cancel the push
    pub upload: Option<JoinHandle<()>>,
}

/// An application session: a [`Cache`], the [`AppState`] loaded from it and an optional [`RemoteSync`]
#[derive(Debug)]
pub struct TaskManager {
    cache: Cache,
    state: AppState,
    remote: Option<RemoteSync>,
    loaded: bool,
}

impl TaskManager {
    /// Create a manager. Nothing is loaded yet
    pub fn new(cache: Cache, remote: Option<RemoteSync>) -> Self {
        Self {
            cache,
            state: AppState::new(),
            remote,
            loaded: false,
        }
    }

    pub fn cache(&self) -> &Cache          { &self.cache }
    pub fn state(&self) -> &AppState       { &self.state }
    /// Mutable access to the state, e.g. to [`subscribe`](AppState::subscribe) to it
    pub fn state_mut(&mut self) -> &mut AppState { &mut self.state }
    pub fn is_loaded(&self) -> bool        { self.loaded }

    /// Load the stored tasks and lists, and replace the current state with them.
    /// Returns the number of tasks that have been loaded
    pub async fn load(&mut self) -> Result<usize, StoreError> {
        let tasks = self.cache.load().await?;
        let lists = self.cache.load_lists().await?;
        log::info!("Loaded {} tasks and {} lists from {:?}", tasks.len(), lists.len(), self.cache.folder());

        let count = tasks.len();
        self.state.replace_tasks(tasks);
        self.state.replace_lists(lists);
        self.loaded = true;
        Ok(count)
    }

    /// Store a snapshot of every task and list.
    /// Returns the number of tasks that have been written
    ///
    /// This fails with [`StoreError::NotLoaded`] until [`TaskManager::load`] has succeeded.
    ///
    /// Lists are written first. If that fails, the tasks snapshot is left untouched. If writing the tasks fails,
    /// the lists snapshot has already been replaced (lists that reference not-yet-stored tasks are harmless, see [`TaskList::tasks`])
    pub async fn save(&self) -> Result<usize, StoreError> {
        if self.loaded == false {
            return Err(StoreError::NotLoaded);
        }

        self.cache.save_lists(self.state.lists().to_vec()).await?;
        let count = self.cache.save(self.state.tasks().to_vec()).await?;
        log::info!("Saved {} tasks to {:?}", count, self.cache.folder());
        Ok(count)
    }

    /// Create a new task, with an id that is not used yet
    pub fn add_task(&mut self, text: String, details: Option<String>, timeframe: Timeframe) -> TaskId {
        let id = self.state.next_task_id();
        self.state.add_task(Task::new(id, text, details, timeframe));
        id
    }

    /// Toggle the completion status of a task, and push it to the remote store.
    /// Returns `None` if there is no such task
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<Toggled> {
        let task = self.state.toggle_completion(id)?.clone();
        let upload = self.remote.as_ref().map(|remote| remote.push(&task));
        Some(Toggled { task, upload })
    }

    /// Create a new list. Returns `false` if a list with that name already exists
    pub fn add_list(&mut self, name: String, symbol: Symbol) -> bool {
        self.state.add_list(TaskList::new(name, symbol))
    }

    /// See [`AppState::assign_to_list`]
    pub fn assign_to_list(&mut self, list_name: &str, task_id: TaskId) -> bool {
        self.state.assign_to_list(list_name, task_id)
    }
}
