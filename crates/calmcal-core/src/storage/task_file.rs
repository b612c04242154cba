//! JSON task list on disk.
//!
//! The file holds the same task JSON the presentation layer exchanges
//! (`date`, `duration`, `type`, `dueDate`), as a plain array.

use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{CoreError, ValidationError, ValidationErrors};
use crate::task::Task;

/// A task list file.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `tasks.json` in the data directory.
    pub fn default_location() -> Result<Self, CoreError> {
        Ok(Self::new(data_dir()?.join("tasks.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the task list; a missing or empty file is an empty list.
    ///
    /// # Errors
    /// Malformed JSON, or any task whose duration is not a positive number of
    /// hours.
    pub fn load(&self) -> Result<Vec<Task>, CoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks: Vec<Task> = serde_json::from_str(&content)?;
        let errors: Vec<ValidationError> = tasks
            .iter()
            .filter(|task| !task.has_valid_duration())
            .map(|task| ValidationError::InvalidValue {
                field: "duration".to_string(),
                message: format!(
                    "task {} has duration {}; must be a positive number of hours",
                    task.id, task.duration_hours
                ),
            })
            .collect();
        if !errors.is_empty() {
            return Err(ValidationErrors(errors).into());
        }
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Overwrite the file with `tasks`.
    pub fn save(&self, tasks: &[Task]) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(tasks)?;
        std::fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}
