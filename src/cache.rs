//! This module provides the local storage of tasks and lists
//!
//! Each collection is stored as a whole in its own JSON file. Every save replaces the previous file entirely.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{LISTS_FILE_NAME, TASKS_FILE_NAME};
use crate::error::StoreError;
use crate::list::TaskList;
use crate::task::Task;

/// Distinguishes the temporary files of overlapping saves within this process
static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A local store that keeps its snapshots in a folder
#[derive(Clone, Debug, PartialEq)]
pub struct Cache {
    folder: PathBuf,
}

impl Cache {
    /// Create a cache that will use `folder`. Nothing is read or written yet
    pub fn new(folder: &Path) -> Self {
        Self { folder: PathBuf::from(folder) }
    }

    /// The default folder, inside the current user's data directory
    pub fn default_folder() -> Result<PathBuf, StoreError> {
        dirs::data_dir()
            .map(|dir| dir.join(crate::config::app_folder_name()))
            .ok_or(StoreError::NoDataDir)
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Path to the snapshot of tasks
    pub fn tasks_file(&self) -> PathBuf {
        self.folder.join(TASKS_FILE_NAME)
    }

    /// Path to the snapshot of lists
    pub fn lists_file(&self) -> PathBuf {
        self.folder.join(LISTS_FILE_NAME)
    }

    /// Read the stored tasks on a background worker.
    ///
    /// No stored file means no task yet: this returns an empty `Vec`, not an error
    pub async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let path = self.tasks_file();
        tokio::task::spawn_blocking(move || read_snapshot(&path)).await?
    }

    /// Write `tasks` on a background worker, replacing the previous snapshot.
    /// Returns the number of tasks that have been written
    pub async fn save(&self, tasks: Vec<Task>) -> Result<usize, StoreError> {
        let path = self.tasks_file();
        tokio::task::spawn_blocking(move || write_snapshot(&path, &tasks)).await?
    }

    /// Same as [`Cache::load`], for the lists
    pub async fn load_lists(&self) -> Result<Vec<TaskList>, StoreError> {
        let path = self.lists_file();
        tokio::task::spawn_blocking(move || read_snapshot(&path)).await?
    }

    /// Same as [`Cache::save`], for the lists
    pub async fn save_lists(&self, lists: Vec<TaskList>) -> Result<usize, StoreError> {
        let path = self.lists_file();
        tokio::task::spawn_blocking(move || write_snapshot(&path, &lists)).await?
    }

    /// Blocking version of [`Cache::load`], for callers that do not run an async runtime
    pub fn load_sync(&self) -> Result<Vec<Task>, StoreError> {
        read_snapshot(&self.tasks_file())
    }

    /// Blocking version of [`Cache::save`], for callers that do not run an async runtime
    pub fn save_sync(&self, tasks: &[Task]) -> Result<usize, StoreError> {
        write_snapshot(&self.tasks_file(), tasks)
    }
}


fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let content = match std::fs::read(path) {
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No snapshot at {:?} yet", path);
            return Ok(Vec::new());
        },
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
        Ok(content) => content,
    };

    let items: Vec<T> = serde_json::from_slice(&content)
        .map_err(|source| StoreError::Decode { path: path.to_path_buf(), source })?;
    log::debug!("Read {} items from {:?}", items.len(), path);
    Ok(items)
}

/// Write to a sibling file first, so that an interrupted write never leaves a truncated snapshot behind
fn write_snapshot<T: Serialize>(path: &Path, items: &[T]) -> Result<usize, StoreError> {
    let io_err = |source| StoreError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_vec(items).map_err(StoreError::Encode)?;
    let temp_path = temp_path_for(path);
    {
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&json).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
    }
    if let Err(source) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(io_err(source));
    }

    log::debug!("Wrote {} items to {:?}", items.len(), path);
    Ok(items.len())
}

/// A sibling of `path` that no other save (in this process or another one) uses at the same time
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let unique = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.tmp", file_name, std::process::id(), unique))
}
