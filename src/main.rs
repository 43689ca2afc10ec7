#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::anyhow;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;
use todo_sidebar_rs::platform::{self, cursor, icons};
use todo_sidebar_rs::tasks::store::DEFAULT_FILE_NAME;
use todo_sidebar_rs::{
    EdgeTrigger, FileTaskStore, Rect, SidebarConfig, SidebarController, SidebarWindow, WindowMode,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow!("invalid log filter: {e}"))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    Ok(())
}

fn load_config() -> (SidebarConfig, Option<String>) {
    let Some(path) = SidebarConfig::default_path() else {
        return (SidebarConfig::default(), None);
    };
    match SidebarConfig::load(&path) {
        Ok(config) => (config, None),
        Err(e) => (SidebarConfig::default(), Some(e.to_string())),
    }
}

fn tasks_path(config: &SidebarConfig) -> PathBuf {
    if let Some(path) = &config.tasks_file {
        return path.clone();
    }
    FileTaskStore::default_path().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using the working directory for the task file");
        PathBuf::from(DEFAULT_FILE_NAME)
    })
}

fn main() -> anyhow::Result<()> {
    let (mut config, config_error) = load_config();
    init_tracing(&config.log_level)?;
    if let Some(error) = config_error {
        tracing::warn!(%error, "ignoring config file, using defaults");
    }

    if config.autostart {
        if let Err(e) = platform::register_at_login() {
            tracing::warn!(error = %e, "could not register autostart");
        }
    }

    if config.window_mode == WindowMode::AutoHide && !cursor::is_supported() {
        tracing::warn!("no global pointer source on this platform; keeping the panel pinned");
        config.window_mode = WindowMode::Pinned;
    }

    let store = FileTaskStore::new(tasks_path(&config));
    tracing::info!(path = %store.path().display(), "task file");

    // The trigger zone is filled in once the monitor size is known.
    let edge = EdgeTrigger::new(Rect::default(), config.window_mode);
    let controller = SidebarController::start(store, edge, &config, Instant::now());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Todo Sidebar")
            .with_inner_size([config.panel_width as f32, 600.0])
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_resizable(false)
            .with_icon(icons::app_icon()),
        ..Default::default()
    };

    eframe::run_native(
        "Todo Sidebar",
        options,
        Box::new(move |cc| Ok(Box::new(SidebarWindow::new(cc, controller, config)))),
    )
    .map_err(|e| anyhow!("failed to open the sidebar window: {e}"))?;

    tracing::info!("sidebar closed");
    Ok(())
}
