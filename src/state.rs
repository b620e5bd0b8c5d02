//! The in-memory state of the application
//!
//! [`AppState`] owns the tasks and lists that are currently displayed. Views do not poll it: they [`subscribe`](AppState::subscribe)
//! and get notified of every change.

use crate::list::TaskList;
use crate::task::{Task, TaskId, Timeframe};

/// A change that has been applied to an [`AppState`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateEvent {
    /// Every task has been replaced, usually after loading them
    TasksReplaced { count: usize },
    /// Every list has been replaced, usually after loading them
    ListsReplaced { count: usize },
    TaskAdded(TaskId),
    TaskToggled { id: TaskId, completed: bool },
    ListAdded(String),
    TaskAssigned { list: String, task: TaskId },
}

/// Something that wants to know when an [`AppState`] changes
pub trait Observer {
    fn notify(&self, event: &StateEvent);
}

impl<F> Observer for F
where
    F: Fn(&StateEvent),
{
    fn notify(&self, event: &StateEvent) {
        self(event)
    }
}

/// Returned by [`AppState::subscribe`], to unsubscribe later
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);


/// Tasks and lists, plus the observers to notify when they change.
///
/// This is meant to be owned by a single sequential context. Background work never mutates it directly,
/// its results are applied here once they have been awaited.
#[derive(Default)]
pub struct AppState {
    tasks: Vec<Task>,
    lists: Vec<TaskList>,

    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    next_subscription: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if this subscription did not exist (anymore)
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != len_before
    }

    fn publish(&self, event: StateEvent) {
        log::trace!("State change: {:?}", event);
        for (_, observer) in &self.observers {
            observer.notify(&event);
        }
    }

    /// Every task, in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.publish(StateEvent::TasksReplaced { count: self.tasks.len() });
    }

    /// Append a task. Its id is not checked against the existing ones
    pub fn add_task(&mut self, task: Task) {
        let id = task.id();
        self.tasks.push(task);
        self.publish(StateEvent::TaskAdded(id));
    }

    /// Toggle the completion of a task, and returns it as updated.
    /// Returns `None` if there is no such task
    pub fn toggle_completion(&mut self, id: TaskId) -> Option<&Task> {
        let index = self.tasks.iter().position(|t| t.id() == id)?;
        self.tasks[index].toggle_completion();
        let completed = self.tasks[index].completed();
        self.publish(StateEvent::TaskToggled { id, completed });
        Some(&self.tasks[index])
    }

    /// The tasks to display in the group of `timeframe`, in insertion order
    pub fn tasks_in(&self, timeframe: Timeframe) -> Vec<&Task> {
        self.tasks.iter()
            .filter(|t| t.is_visible_in(timeframe))
            .collect()
    }

    /// An id that no current task uses.
    ///
    /// This is the highest id plus one, or the lowest unused positive id once the highest id is `TaskId::MAX`
    pub fn next_task_id(&self) -> TaskId {
        let max = match self.tasks.iter().map(|t| t.id()).max() {
            None => return 1,
            Some(max) => max,
        };
        if let Some(next) = max.checked_add(1) {
            return next;
        }

        let mut used: Vec<TaskId> = self.tasks.iter()
            .map(|t| t.id())
            .filter(|id| *id > 0)
            .collect();
        used.sort_unstable();
        used.dedup();

        // `used` holds fewer than TaskId::MAX ids, so there is a gap before its end
        let mut candidate = 1;
        for id in used {
            if id != candidate {
                break;
            }
            candidate += 1;
        }
        candidate
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn list(&self, name: &str) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.name() == name)
    }

    pub fn replace_lists(&mut self, lists: Vec<TaskList>) {
        self.lists = lists;
        self.publish(StateEvent::ListsReplaced { count: self.lists.len() });
    }

    /// Returns `false` (and does nothing) if a list with the same name already exists
    pub fn add_list(&mut self, list: TaskList) -> bool {
        if self.list(list.name()).is_some() {
            log::warn!("A list named {:?} already exists", list.name());
            return false;
        }
        let name = list.name().to_string();
        self.lists.push(list);
        self.publish(StateEvent::ListAdded(name));
        true
    }

    /// Add a task to a list.
    /// Returns `false` if there is no such list or no such task, or if the task is already in this list
    pub fn assign_to_list(&mut self, list_name: &str, task_id: TaskId) -> bool {
        if self.task(task_id).is_none() {
            return false;
        }
        let list = match self.lists.iter_mut().find(|l| l.name() == list_name) {
            None => return false,
            Some(list) => list,
        };
        if list.add_task(task_id) == false {
            return false;
        }
        self.publish(StateEvent::TaskAssigned { list: list_name.to_string(), task: task_id });
        true
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tasks", &self.tasks)
            .field("lists", &self.lists)
            .field("observers", &self.observers.len())
            .finish()
    }
}
