use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::io::task_file::{self, FileError};
use crate::model::task::{Priority, Task, TaskHandle};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(u64),
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("no task ids left to assign")]
    IdsExhausted,
    #[error(transparent)]
    File(#[from] FileError),
}

/// Completion summary over the whole store
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage in `0.0..=100.0`; zero for an empty store
    pub completion_rate: f64,
}

/// All tasks for one file.
///
/// Tasks live behind shared handles: `ordered` keeps insertion order and is
/// what gets written to disk, `index` maps ids to the same handles for
/// constant-time lookup. Every mutation is followed by a full save.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    ordered: Vec<TaskHandle>,
    index: HashMap<u64, TaskHandle>,
    next_id: u64,
}

impl TaskStore {
    /// Create an empty store bound to `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TaskStore {
            path: path.into(),
            ordered: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Id the next `add` will assign
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Replace the in-memory tasks with the file's contents and return how
    /// many were loaded. A missing file loads as empty.
    ///
    /// On error the store is left empty and the file is not touched; the
    /// caller decides how to report it and may keep using the store.
    pub fn load(&mut self) -> Result<usize, FileError> {
        self.reset();
        let tasks = match task_file::read_tasks(&self.path) {
            Ok(Some(tasks)) => tasks,
            Ok(None) => {
                debug!(path = %self.path.display(), "no task file, starting empty");
                return Ok(0);
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "task file unreadable, starting empty");
                return Err(e);
            }
        };

        for task in tasks {
            let id = task.id;
            let handle = Rc::new(RefCell::new(task));
            self.index.insert(id, Rc::clone(&handle));
            self.ordered.push(handle);
        }
        let max_id = self.index.keys().max().copied().unwrap_or(0);
        self.next_id = match max_id.checked_add(1) {
            Some(id) => id,
            None => {
                let e = FileError::IdOverflow {
                    path: self.path.clone(),
                    id: max_id,
                };
                warn!(path = %self.path.display(), error = %e, "task file unreadable, starting empty");
                self.reset();
                return Err(e);
            }
        };

        debug!(path = %self.path.display(), count = self.len(), "loaded tasks");
        Ok(self.len())
    }

    /// Write every task, in canonical order, over the task file
    pub fn save(&self) -> Result<(), FileError> {
        let borrowed: Vec<Ref<'_, Task>> = self.ordered.iter().map(|h| h.borrow()).collect();
        let content = task_file::serialize_tasks(borrowed.iter().map(|t| &**t))?;
        task_file::write_tasks(&self.path, &content)?;
        debug!(path = %self.path.display(), count = self.len(), "saved tasks");
        Ok(())
    }

    fn reset(&mut self) {
        self.ordered.clear();
        self.index.clear();
        self.next_id = 1;
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a pending task and save. The title is trimmed and must not be
    /// empty.
    ///
    /// If the save fails the task is still added in memory and the write
    /// error is returned; a later save will include it.
    pub fn add(&mut self, title: &str, priority: Priority) -> Result<Task, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(TaskError::IdsExhausted)?;
        let task = Task::new(id, title.to_string(), priority);
        let handle = Rc::new(RefCell::new(task.clone()));
        self.ordered.push(Rc::clone(&handle));
        self.index.insert(id, handle);
        self.next_id = next_id;

        self.save()?;
        Ok(task)
    }

    /// Mark a task completed and save. Completing a task that is already
    /// completed succeeds.
    pub fn complete(&mut self, id: u64) -> Result<Task, TaskError> {
        let task = {
            let handle = self.index.get(&id).ok_or(TaskError::NotFound(id))?;
            let mut task = handle.borrow_mut();
            task.completed = true;
            task.clone()
        };
        self.save()?;
        Ok(task)
    }

    /// Remove a task and save, returning the removed task. The remaining
    /// tasks keep their order and ids.
    pub fn delete(&mut self, id: u64) -> Result<Task, TaskError> {
        let handle = self.index.remove(&id).ok_or(TaskError::NotFound(id))?;
        self.ordered.retain(|h| !Rc::ptr_eq(h, &handle));
        let task = handle.borrow().clone();
        self.save()?;
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn find(&self, id: u64) -> Option<Task> {
        self.index.get(&id).map(|h| h.borrow().clone())
    }

    /// All tasks in canonical (insertion) order
    pub fn tasks(&self) -> Vec<Task> {
        self.ordered.iter().map(|h| h.borrow().clone()).collect()
    }

    /// Tasks sorted by priority, optionally restricted to one priority.
    /// Ties keep insertion order.
    pub fn list(&self, filter: Option<Priority>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .ordered
            .iter()
            .map(|h| h.borrow())
            .filter(|t| filter.is_none_or(|p| t.priority == p))
            .map(|t| Task::clone(&t))
            .collect();
        // sort_by_key is stable
        tasks.sort_by_key(|t| t.priority.rank());
        tasks
    }

    /// Every task sorted by priority. The stored order is unchanged.
    pub fn sort_by_priority(&self) -> Vec<Task> {
        self.list(None)
    }

    pub fn statistics(&self) -> Statistics {
        let total = self.ordered.len();
        let completed = self.ordered.iter().filter(|h| h.borrow().completed).count();
        let completion_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        Statistics {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}
