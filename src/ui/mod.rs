//! UI module for the sidebar window.
//!
//! This module provides the native window, the task panel, and reusable
//! UI components.

pub mod components;
pub mod panel;
pub mod theme;
pub mod window;

pub use panel::{PanelAction, PanelView};
pub use theme::Theme;
pub use window::SidebarWindow;
