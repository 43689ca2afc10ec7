//! Start-at-login registration.
//!
//! On Windows the executable is written to the per-user `Run` registry key.
//! Elsewhere an XDG autostart desktop entry is used.

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Autostart error types.
#[derive(Debug, Error)]
pub enum AutostartError {
    #[error("Failed to access registry: {0}")]
    RegistryAccess(String),

    #[error("Failed to write autostart entry: {key}")]
    WriteFailed { key: String },

    #[error("Could not determine the executable path: {0}")]
    ExecutablePath(#[source] std::io::Error),

    #[error("No configuration directory for autostart entries")]
    NoConfigDir,

    #[error("Autostart entry I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Name the entry is registered under.
pub const APP_NAME: &str = "TodoSidebar";

/// Quoted invocation of the running executable.
pub fn launch_command() -> Result<String, AutostartError> {
    let exe = std::env::current_exe().map_err(AutostartError::ExecutablePath)?;
    Ok(quote(&exe.to_string_lossy()))
}

fn quote(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('"');
    for c in path.chars() {
        // Desktop-entry Exec values treat these as special inside quotes.
        if cfg!(not(windows)) && matches!(c, '"' | '`' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(windows)]
pub use self::registry::RegistryAutostart as SystemAutostart;

#[cfg(not(windows))]
pub use self::XdgAutostart as SystemAutostart;

/// Register the running executable to start at login.
pub fn register_at_login() -> Result<(), AutostartError> {
    let command = launch_command()?;
    SystemAutostart::new()?.enable(&command)?;
    tracing::info!(command = %command, "registered autostart");
    Ok(())
}

/// XDG autostart desktop entry (`~/.config/autostart/todo-sidebar.desktop`).
#[derive(Debug, Clone)]
pub struct XdgAutostart {
    dir: PathBuf,
}

impl XdgAutostart {
    const FILE_NAME: &'static str = "todo-sidebar.desktop";

    pub fn new() -> Result<Self, AutostartError> {
        let dir = dirs::config_dir()
            .ok_or(AutostartError::NoConfigDir)?
            .join("autostart");
        Ok(Self { dir })
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn entry_path(&self) -> PathBuf {
        self.dir.join(Self::FILE_NAME)
    }

    fn desktop_entry(command: &str) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name={APP_NAME}\n\
             Exec={command}\n\
             NoDisplay=true\n\
             X-GNOME-Autostart-enabled=true\n"
        )
    }

    /// Write the entry, replacing any older one.
    pub fn enable(&self, command: &str) -> Result<(), AutostartError> {
        let path = self.entry_path();
        let io_err = |source| AutostartError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(&path, Self::desktop_entry(command)).map_err(io_err)
    }
}

#[cfg(windows)]
mod registry {
    use super::{AutostartError, APP_NAME};
    use windows::core::PCWSTR;
    use windows::Win32::System::Registry::{
        RegCloseKey, RegOpenKeyExW, RegSetValueExW, HKEY, HKEY_CURRENT_USER, KEY_WRITE, REG_SZ,
    };

    /// Per-user `Run` key entry.
    pub struct RegistryAutostart {
        run_key_path: Vec<u16>,
        value_name: Vec<u16>,
    }

    impl RegistryAutostart {
        const RUN_KEY: &'static str = r"Software\Microsoft\Windows\CurrentVersion\Run";

        pub fn new() -> Result<Self, AutostartError> {
            Ok(Self {
                run_key_path: to_wide(Self::RUN_KEY),
                value_name: to_wide(APP_NAME),
            })
        }

        /// Write `command` as the `Run` value, replacing any older one.
        pub fn enable(&self, command: &str) -> Result<(), AutostartError> {
            let command_wide = to_wide(command);
            let written = unsafe {
                let mut hkey = HKEY::default();
                RegOpenKeyExW(
                    HKEY_CURRENT_USER,
                    PCWSTR::from_raw(self.run_key_path.as_ptr()),
                    0,
                    KEY_WRITE,
                    &mut hkey,
                )
                .ok()
                .map_err(|e| AutostartError::RegistryAccess(e.message()))?;

                let result = RegSetValueExW(
                    hkey,
                    PCWSTR::from_raw(self.value_name.as_ptr()),
                    0,
                    REG_SZ,
                    Some(std::slice::from_raw_parts(
                        command_wide.as_ptr().cast::<u8>(),
                        command_wide.len() * 2,
                    )),
                );
                let _ = RegCloseKey(hkey);
                result
            };

            written.ok().map_err(|_| AutostartError::WriteFailed {
                key: APP_NAME.to_string(),
            })
        }
    }

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_quote_escapes_shell_characters() {
        assert_eq!(quote("/opt/todo sidebar/bin"), "\"/opt/todo sidebar/bin\"");
        assert_eq!(quote("/a\"b$c"), "\"/a\\\"b\\$c\"");
    }

    #[test]
    fn test_xdg_enable_writes_entry() {
        let dir = tempfile::tempdir().unwrap();
        let autostart = XdgAutostart::with_dir(dir.path().join("autostart"));

        autostart.enable("\"/usr/bin/old\"").unwrap();
        autostart.enable("\"/usr/bin/todo-sidebar\"").unwrap();

        let entry = fs::read_to_string(autostart.entry_path()).unwrap();
        assert!(entry.starts_with("[Desktop Entry]\n"));
        assert!(entry.contains("Exec=\"/usr/bin/todo-sidebar\"\n"));
        assert!(!entry.contains("/usr/bin/old"));
    }

    #[test]
    fn test_launch_command_is_quoted() {
        let command = launch_command().unwrap();
        assert!(command.starts_with('"') && command.ends_with('"'));
    }
}
