//! Platform-specific module.
//!
//! This module contains the OS integrations: start-at-login registration,
//! the global pointer source and the generated window icon.

pub mod autostart;
pub mod cursor;
pub mod icons;

pub use autostart::{register_at_login, AutostartError, SystemAutostart, XdgAutostart};
