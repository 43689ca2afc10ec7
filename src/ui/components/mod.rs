//! Reusable UI components for the sidebar panel.

pub mod task_row;

pub use task_row::{TaskRow, TaskRowAction};
