//! Application state and lifecycle management.
//!
//! `SidebarController` owns the task list, the expiry timers, the edge
//! trigger and the store. Every UI callback goes through it, and every
//! mutation is written back to the store.

use crate::config::SidebarConfig;
use crate::edge::{EdgeTrigger, Position, Rect, Transition};
use crate::tasks::{
    ExpiryScheduler, Importance, Task, TaskError, TaskId, TaskList, TaskStore,
};
use std::time::{Duration, Instant};

/// Main application state.
pub struct SidebarController<S: TaskStore> {
    tasks: TaskList,
    expiry: ExpiryScheduler,
    edge: EdgeTrigger,
    store: S,

    /// Last save failure, shown in the panel until a save succeeds
    save_error: Option<String>,
}

impl<S: TaskStore> SidebarController<S> {
    /// Build a controller from its parts without touching the store.
    pub fn new(store: S, edge: EdgeTrigger, expiry: ExpiryScheduler) -> Self {
        Self {
            tasks: TaskList::new(),
            expiry,
            edge,
            store,
            save_error: None,
        }
    }

    /// Load the persisted list and arm timers for tasks that are already checked.
    ///
    /// A store that cannot be read leaves the list empty.
    pub fn start(store: S, edge: EdgeTrigger, config: &SidebarConfig, now: Instant) -> Self {
        let mut controller = Self::new(store, edge, ExpiryScheduler::new(config.expiry_delay()));

        match controller.store.load() {
            Ok(records) => {
                for record in records {
                    if let Some(id) = controller.tasks.push_record(record) {
                        if controller.tasks.get(id).is_some_and(|t| t.checked) {
                            controller.expiry.arm(id, now);
                        }
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not load tasks, starting empty"),
        }

        tracing::info!(
            tasks = controller.tasks.len(),
            pending_expiries = controller.expiry.len(),
            "sidebar started"
        );
        controller
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn edge(&self) -> &EdgeTrigger {
        &self.edge
    }

    pub fn edge_mut(&mut self) -> &mut EdgeTrigger {
        &mut self.edge
    }

    pub fn expiry(&self) -> &ExpiryScheduler {
        &self.expiry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    pub fn is_panel_visible(&self) -> bool {
        self.edge.is_visible()
    }

    /// Write the list back. Failures are kept for display, never propagated.
    fn persist(&mut self) {
        match self.store.save(&self.tasks.records()) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to save tasks; keeping them in memory");
                self.save_error = Some(e.to_string());
            }
        }
    }

    /// Append a new task at the bottom of the list.
    pub fn add_task(&mut self, text: &str, importance: Importance) -> Result<TaskId, TaskError> {
        let id = self.tasks.push(text, importance)?;
        tracing::info!(task = %id, ?importance, "added task");
        self.persist();
        Ok(id)
    }

    /// Check or uncheck a task. Checking starts its expiry timer;
    /// unchecking cancels it. Setting the flag it already has does nothing.
    pub fn set_checked(&mut self, id: TaskId, checked: bool, now: Instant) -> Result<(), TaskError> {
        if self.tasks.set_checked(id, checked)? == checked {
            return Ok(());
        }
        if checked {
            self.expiry.arm(id, now);
        } else {
            self.expiry.disarm(id);
        }
        tracing::debug!(task = %id, checked, "toggled task");
        self.persist();
        Ok(())
    }

    pub fn toggle_checked(&mut self, id: TaskId, now: Instant) -> Result<(), TaskError> {
        let checked = self.tasks.get(id).ok_or(TaskError::NotFound(id))?.checked;
        self.set_checked(id, !checked, now)
    }

    /// Delete one task right away.
    pub fn remove_task(&mut self, id: TaskId) -> Result<(), TaskError> {
        self.tasks.remove(id).ok_or(TaskError::NotFound(id))?;
        self.expiry.disarm(id);
        tracing::info!(task = %id, "removed task");
        self.persist();
        Ok(())
    }

    /// Move the task at position `from` to position `to`.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), TaskError> {
        self.tasks.move_task(from, to)?;
        tracing::debug!(from, to, "reordered tasks");
        self.persist();
        Ok(())
    }

    /// Remove every checked task without waiting for its timer.
    pub fn remove_checked_now(&mut self) -> Vec<TaskId> {
        let removed = self.tasks.drain_checked();
        for id in &removed {
            self.expiry.disarm(*id);
        }
        tracing::info!(count = removed.len(), "removed checked tasks");
        self.persist();
        removed
    }

    /// Run every expiry whose deadline has passed. Returns the ids actually removed.
    pub fn fire_due_expiries(&mut self, now: Instant) -> Vec<TaskId> {
        let due = self.expiry.take_due(now);
        if due.is_empty() {
            return Vec::new();
        }

        let removed: Vec<TaskId> = due
            .into_iter()
            .filter(|id| self.on_expiry_fired(*id))
            .collect();
        if !removed.is_empty() {
            self.persist();
        }
        removed
    }

    /// One timer fired. The task may already be gone through another path;
    /// that is not an error.
    fn on_expiry_fired(&mut self, id: TaskId) -> bool {
        self.expiry.disarm(id);
        match self.tasks.remove(id) {
            Some(_) => {
                tracing::info!(task = %id, "checked task expired");
                true
            }
            None => {
                tracing::debug!(task = %id, "expiry fired for a task that is already gone");
                false
            }
        }
    }

    /// Feed a pointer sample to the edge trigger.
    pub fn poll_pointer(&mut self, pointer: Position, panel: Rect) -> Option<Transition> {
        let transition = self.edge.poll(pointer, panel);
        if let Some(transition) = transition {
            tracing::debug!(?transition, x = pointer.x, y = pointer.y, "panel transition");
        }
        transition
    }

    /// How long the control loop may sleep before it must run again.
    pub fn next_wakeup(&self, now: Instant, poll_interval: Duration) -> Duration {
        match self.expiry.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(poll_interval),
            None => poll_interval,
        }
    }
}
