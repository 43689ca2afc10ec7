//! Sidebar styling and theme colors.
//!
//! Translucent dark panel with light cards, matching the look of a
//! frosted desktop widget.

use crate::tasks::Importance;
use eframe::egui;

/// Sidebar theme colors.
pub struct Theme {
    /// Window background behind the cards
    pub background: egui::Color32,

    /// Card color (title, task rows, input area)
    pub card: egui::Color32,

    /// Text primary color
    pub text_primary: egui::Color32,

    /// Text of checked tasks
    pub text_done: egui::Color32,

    /// Text of important tasks
    pub important: egui::Color32,

    /// "Add" button
    pub accent: egui::Color32,
    pub accent_hover: egui::Color32,

    /// "Delete checked" button and error banner
    pub danger: egui::Color32,
    pub danger_hover: egui::Color32,

    /// Input border
    pub border: egui::Color32,
}

impl Theme {
    /// Create the sidebar theme.
    pub fn sidebar() -> Self {
        Self {
            background: egui::Color32::from_rgba_unmultiplied(20, 20, 20, 180),
            card: egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200),
            text_primary: egui::Color32::BLACK,
            text_done: egui::Color32::from_gray(120),
            important: egui::Color32::from_rgb(200, 0, 0),
            accent: egui::Color32::from_rgb(0, 120, 215),
            accent_hover: egui::Color32::from_rgb(0, 89, 159),
            danger: egui::Color32::from_rgb(211, 47, 47),
            danger_hover: egui::Color32::from_rgb(183, 28, 28),
            border: egui::Color32::from_rgb(204, 204, 204),
        }
    }

    /// Text color for a task row.
    pub fn task_color(&self, importance: Importance, checked: bool) -> egui::Color32 {
        match (importance, checked) {
            (_, true) => self.text_done,
            (Importance::Important, false) => self.important,
            (Importance::Normal, false) => self.text_primary,
        }
    }

    /// Apply the theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        // Panel colors
        style.visuals.panel_fill = self.background;
        style.visuals.window_fill = self.card;
        style.visuals.extreme_bg_color = self.card;

        // Widget colors
        style.visuals.widgets.noninteractive.bg_fill = self.card;
        style.visuals.widgets.inactive.bg_fill = self.card;
        style.visuals.widgets.inactive.weak_bg_fill = self.card;
        style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, self.border);
        style.visuals.widgets.hovered.bg_fill = self.card;
        style.visuals.widgets.active.bg_fill = self.accent;

        // Text colors
        style.visuals.widgets.noninteractive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.inactive.fg_stroke.color = self.text_primary;
        style.visuals.widgets.hovered.fg_stroke.color = self.text_primary;
        style.visuals.widgets.active.fg_stroke.color = self.text_primary;

        // Selection must not tint rows
        style.visuals.selection.bg_fill = self.card;
        style.visuals.selection.stroke.color = self.text_primary;

        style.visuals.window_rounding = egui::Rounding::same(15.0);

        ctx.set_style(style);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::sidebar()
    }
}
