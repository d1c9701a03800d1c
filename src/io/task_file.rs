use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::Task;

/// Error type for task file I/O
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse {path}: task id {id} appears more than once")]
    DuplicateId { path: PathBuf, id: u64 },
    #[error("could not parse {path}: task id {id} {reason}")]
    InvalidTask {
        path: PathBuf,
        id: u64,
        reason: &'static str,
    },
    #[error("could not parse {path}: task id {id} leaves no room for new ids")]
    IdOverflow { path: PathBuf, id: u64 },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Read the task file. A missing file is not an error and yields `None`.
pub fn read_tasks(path: &Path) -> Result<Option<Vec<Task>>, FileError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(FileError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let tasks: Vec<Task> = serde_json::from_str(&text).map_err(|e| FileError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        let invalid = if task.id == 0 {
            Some("is not a positive id")
        } else if task.title.trim().is_empty() {
            Some("has an empty title")
        } else {
            None
        };
        if let Some(reason) = invalid {
            return Err(FileError::InvalidTask {
                path: path.to_path_buf(),
                id: task.id,
                reason,
            });
        }
        if task.id == u64::MAX {
            return Err(FileError::IdOverflow {
                path: path.to_path_buf(),
                id: task.id,
            });
        }
        if !seen.insert(task.id) {
            return Err(FileError::DuplicateId {
                path: path.to_path_buf(),
                id: task.id,
            });
        }
    }
    Ok(Some(tasks))
}

/// Serialize tasks in the on-disk layout: a pretty-printed array with
/// a trailing newline. Non-ASCII text is written as-is.
pub fn serialize_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Result<String, FileError> {
    let tasks: Vec<&Task> = tasks.into_iter().collect();
    let mut out = serde_json::to_string_pretty(&tasks)?;
    out.push('\n');
    Ok(out)
}

/// Replace the task file with the given content
pub fn write_tasks(path: &Path, content: &str) -> Result<(), FileError> {
    atomic_write(path, content.as_bytes()).map_err(|e| FileError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write to a temp file in the same directory, then rename over the target
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
