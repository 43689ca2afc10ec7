//! Native sidebar window.
//!
//! Drives the controller once per frame: fires due expiries, polls the
//! global pointer, places the window and renders the panel.

use crate::app::SidebarController;
use crate::config::SidebarConfig;
use crate::edge::{PanelState, Rect, ScreenEdge, Transition};
use crate::platform::cursor;
use crate::tasks::{TaskError, TaskStore};
use crate::ui::panel::{PanelAction, PanelView};
use crate::ui::theme::Theme;
use eframe::egui;
use std::time::{Duration, Instant};

/// Delay before the cosmetic repaint that follows showing the panel.
const REFRESH_AFTER_SHOW: Duration = Duration::from_millis(100);

/// eframe application hosting the sidebar.
pub struct SidebarWindow<S: TaskStore> {
    controller: SidebarController<S>,
    panel: PanelView,
    theme: Theme,
    config: SidebarConfig,

    /// Monitor rectangle in points, once known
    screen: Option<Rect>,

    /// Placement last sent to the viewport
    placed: Option<PanelState>,
}

impl<S: TaskStore> SidebarWindow<S> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        controller: SidebarController<S>,
        config: SidebarConfig,
    ) -> Self {
        let theme = Theme::sidebar();
        theme.apply(&cc.egui_ctx);

        Self {
            controller,
            panel: PanelView::new(),
            theme,
            config,
            screen: None,
            placed: None,
        }
    }

    fn panel_rect(&self, screen: Rect) -> Rect {
        self.config.edge.strip(screen, self.config.panel_width)
    }

    /// Pick up the monitor size and rebuild the trigger zone when it changes.
    fn sync_screen(&mut self, ctx: &egui::Context) -> Option<Rect> {
        let size = ctx.input(|i| i.viewport().monitor_size)?;
        let screen = Rect::from_origin_size(0.0, 0.0, size.x as f64, size.y as f64);

        if self.screen != Some(screen) {
            let zone = self.config.edge.strip(screen, self.config.trigger_width);
            self.controller.edge_mut().set_zone(zone);
            self.screen = Some(screen);
            self.placed = None;
            tracing::info!(width = size.x, height = size.y, "monitor size");
        }
        Some(screen)
    }

    /// Move the window on or off screen to match the trigger state.
    ///
    /// A hidden panel is parked just past the screen edge instead of being
    /// unmapped, so frames keep arriving and the pointer keeps being polled.
    fn place(&mut self, ctx: &egui::Context, screen: Rect) {
        let state = self.controller.edge().state();
        if self.placed == Some(state) {
            return;
        }

        let panel = self.panel_rect(screen);
        let left = match (state, self.config.edge) {
            (PanelState::Visible, _) => panel.left,
            (PanelState::Hidden, ScreenEdge::Right) => screen.right + 1.0,
            (PanelState::Hidden, ScreenEdge::Left) => screen.left - panel.width() - 1.0,
        };

        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
            panel.width() as f32,
            panel.height() as f32,
        )));
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
            left as f32,
            panel.top as f32,
        )));
        if state == PanelState::Visible {
            ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
        }

        self.placed = Some(state);
    }

    fn apply(&mut self, ctx: &egui::Context, action: PanelAction, now: Instant) {
        let result = match action {
            PanelAction::AddTask { text, importance } => {
                self.controller.add_task(&text, importance).map(|_| ())
            }
            PanelAction::SetChecked { id, checked } => {
                self.controller.set_checked(id, checked, now)
            }
            PanelAction::RemoveTask(id) => self.controller.remove_task(id),
            PanelAction::MoveTask { from, to } => self.controller.move_task(from, to),
            PanelAction::RemoveChecked => {
                self.controller.remove_checked_now();
                Ok(())
            }
            PanelAction::Quit => {
                tracing::info!("quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(TaskError::EmptyText) => tracing::debug!("ignored empty task"),
            Err(e) => tracing::warn!(error = %e, "panel action failed"),
        }
    }
}

impl<S: TaskStore> eframe::App for SidebarWindow<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.controller.fire_due_expiries(now);

        if let Some(screen) = self.sync_screen(ctx) {
            if let Some(physical) = cursor::global_cursor_position() {
                let pointer = cursor::to_points(physical, ctx.pixels_per_point());
                let panel = self.panel_rect(screen);
                if self.controller.poll_pointer(pointer, panel) == Some(Transition::Show) {
                    ctx.request_repaint_after(REFRESH_AFTER_SHOW);
                }
            }
            self.place(ctx, screen);
        }

        if self.controller.is_panel_visible() {
            self.panel.show(
                ctx,
                &self.theme,
                self.controller.tasks(),
                self.controller.save_error(),
            );
            for action in self.panel.take_actions() {
                self.apply(ctx, action, now);
            }
        }

        ctx.request_repaint_after(
            self.controller
                .next_wakeup(Instant::now(), self.config.poll_interval()),
        );
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Transparent outside the rounded panel
        [0.0, 0.0, 0.0, 0.0]
    }
}
