//! Task data models.
//!
//! Defines the reminder entries shown in the sidebar, their ordered list,
//! and the errors raised when the list is mutated.

use std::fmt;
use thiserror::Error;

/// Opaque in-memory identifier of a task.
///
/// Handed out by [`TaskList`] and never reused within a process. It has no
/// relation to the order tasks are persisted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw numeric value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How prominently a task is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    #[default]
    Normal,

    /// Rendered in red
    Important,
}

impl Importance {
    /// Token used in the persisted file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Normal => "normal",
            Importance::Important => "important",
        }
    }

    /// Parse a persisted token. Anything unrecognised is `Normal`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "important" => Importance::Important,
            _ => Importance::Normal,
        }
    }
}

/// A single reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,

    /// Non-empty, single-line text
    pub text: String,

    pub checked: bool,

    pub importance: Importance,
}

/// A task before it has been given an id, as read from or written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub checked: bool,
    pub importance: Importance,
    pub text: String,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            checked: task.checked,
            importance: task.importance,
            text: task.text.clone(),
        }
    }
}

/// Task list error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task text is empty")]
    EmptyText,

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("Position {index} is out of range for a list of {len} tasks")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered list of tasks. Position is display and priority order.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalise user text: trim, and fold line breaks so a task stays one record.
    pub fn normalize_text(text: &str) -> String {
        text.trim()
            .split(['\r', '\n'])
            .filter(|part| !part.trim().is_empty())
            .map(str::trim)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new unchecked task.
    pub fn push(&mut self, text: &str, importance: Importance) -> Result<TaskId, TaskError> {
        let text = Self::normalize_text(text);
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }

        let id = self.allocate_id();
        self.tasks.push(Task {
            id,
            text,
            checked: false,
            importance,
        });
        Ok(id)
    }

    /// Append a persisted record, keeping its checked flag.
    ///
    /// Records with empty text are dropped and yield `None`.
    pub fn push_record(&mut self, record: TaskRecord) -> Option<TaskId> {
        let text = Self::normalize_text(&record.text);
        if text.is_empty() {
            return None;
        }

        let id = self.allocate_id();
        self.tasks.push(Task {
            id,
            text,
            checked: record.checked,
            importance: record.importance,
        });
        Some(id)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Set the checked flag. Returns the previous value.
    pub fn set_checked(&mut self, id: TaskId, checked: bool) -> Result<bool, TaskError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;
        let previous = task.checked;
        task.checked = checked;
        Ok(previous)
    }

    /// Remove a task, returning it if it was present.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    /// Move the task at `from` so that it ends up at position `to`.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), TaskError> {
        let len = self.tasks.len();
        if from >= len {
            return Err(TaskError::OutOfRange { index: from, len });
        }
        if to >= len {
            return Err(TaskError::OutOfRange { index: to, len });
        }

        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    /// Remove every checked task, walking from the bottom of the list up.
    ///
    /// Returned ids are in removal order (reverse display order).
    pub fn drain_checked(&mut self) -> Vec<TaskId> {
        let mut removed = Vec::new();
        for index in (0..self.tasks.len()).rev() {
            if self.tasks[index].checked {
                removed.push(self.tasks.remove(index).id);
            }
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn records(&self) -> Vec<TaskRecord> {
        self.tasks.iter().map(TaskRecord::from).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
