//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// Name of the local snapshot of tasks, inside the data folder
pub const TASKS_FILE_NAME: &str = "tasks.data";
/// Name of the local snapshot of lists, inside the data folder
pub const LISTS_FILE_NAME: &str = "lists.data";

/// Name of the folder that is created in the user's data directory (e.g. `~/.local/share/task-manager`).
/// Feel free to override it when initing this library.
pub static APP_FOLDER_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("task-manager".to_string())));

/// The record type tasks are stored as in a remote [`RecordStore`](crate::traits::RecordStore).
/// Feel free to override it when initing this library.
pub static RECORD_TYPE: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("task".to_string())));

pub(crate) fn app_folder_name() -> String {
    read_setting(&APP_FOLDER_NAME)
}

pub(crate) fn record_type() -> String {
    read_setting(&RECORD_TYPE)
}

fn read_setting(setting: &Mutex<String>) -> String {
    // A poisoned lock still holds a valid String
    match setting.lock() {
        Ok(value) => value.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
