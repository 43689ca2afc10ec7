//! Sidebar configuration.
//!
//! Read from an optional TOML file; every key falls back to a default.

use crate::edge::{ScreenEdge, WindowMode};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// How often the pointer is sampled
    pub poll_interval_ms: u64,

    /// Width of the edge strip that opens the panel
    pub trigger_width: f64,

    pub panel_width: f64,

    /// How long a checked task lingers before removal
    pub expiry_delay_ms: u64,

    pub edge: ScreenEdge,

    pub window_mode: WindowMode,

    /// Task file; `~/todo_sidebar_tasks.txt` when unset
    pub tasks_file: Option<PathBuf>,

    /// Register the executable to start at login
    pub autostart: bool,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            trigger_width: 20.0,
            panel_width: 300.0,
            expiry_delay_ms: 3000,
            edge: ScreenEdge::Right,
            window_mode: WindowMode::AutoHide,
            tasks_file: None,
            autostart: true,
            log_level: "info".to_string(),
        }
    }
}

impl SidebarConfig {
    const DIR_NAME: &'static str = "todo-sidebar";
    const FILE_NAME: &'static str = "config.toml";

    /// `<config dir>/todo-sidebar/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::DIR_NAME).join(Self::FILE_NAME))
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn expiry_delay(&self) -> Duration {
        Duration::from_millis(self.expiry_delay_ms)
    }
}
