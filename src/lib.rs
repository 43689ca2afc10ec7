//! Todo Sidebar - Library
//!
//! An auto-hiding desktop sidebar for short todo reminders.
//!
//! ## Features
//!
//! - Panel slides in when the pointer touches the screen edge and hides
//!   when it leaves
//! - Checked tasks are removed automatically after a short delay
//! - Drag to reorder, mark tasks as important
//! - Plain-text task file in the home directory
//! - Starts at login

pub mod app;
pub mod config;
pub mod edge;
pub mod platform;
pub mod tasks;
pub mod ui;

pub use app::SidebarController;
pub use config::{ConfigError, SidebarConfig};
pub use edge::{EdgeTrigger, PanelState, Position, Rect, ScreenEdge, Transition, WindowMode};
pub use tasks::{
    ExpiryScheduler, FileTaskStore, Importance, MemoryTaskStore, StoreError, Task, TaskError,
    TaskId, TaskList, TaskRecord, TaskStore,
};
pub use ui::SidebarWindow;
