//! Sidebar panel implementation using eframe/egui.
//!
//! Displays the task list, the new-task form and the bulk delete button.

use crate::tasks::{Importance, Task, TaskId};
use crate::ui::components::{TaskRow, TaskRowAction};
use crate::ui::theme::Theme;
use eframe::egui;

/// Actions that can be triggered from the panel UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// Add a task from the input form
    AddTask { text: String, importance: Importance },
    /// Check or uncheck a task
    SetChecked { id: TaskId, checked: bool },
    /// Delete a single task
    RemoveTask(TaskId),
    /// Reorder by position
    MoveTask { from: usize, to: usize },
    /// Delete every checked task now
    RemoveChecked,
    /// Close the sidebar
    Quit,
}

/// Panel state that lives across frames.
pub struct PanelView {
    /// Text typed into the new-task input
    pub draft: String,

    /// "Mark as important" checkbox
    pub draft_important: bool,

    /// Pending actions from the UI
    pub actions: Vec<PanelAction>,
}

impl PanelView {
    /// Create a new PanelView.
    pub fn new() -> Self {
        Self {
            draft: String::new(),
            draft_important: false,
            actions: Vec::new(),
        }
    }

    /// Render the panel content.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        theme: &Theme,
        tasks: &[Task],
        save_error: Option<&str>,
    ) {
        self.actions.clear();

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme.background)
                    .rounding(15.0)
                    .inner_margin(egui::Margin::symmetric(10.0, 20.0)),
            )
            .show(ctx, |ui| {
                self.render_header(ui, theme);
                ui.add_space(10.0);

                if let Some(error) = save_error {
                    egui::Frame::none()
                        .fill(theme.card)
                        .rounding(8.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.colored_label(theme.danger, format!("Not saved: {}", error));
                        });
                    ui.add_space(10.0);
                }

                // Leave room for the form at the bottom
                let form_height = 190.0;
                let list_height = (ui.available_height() - form_height).max(60.0);

                egui::ScrollArea::vertical()
                    .max_height(list_height)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        if tasks.is_empty() {
                            ui.vertical_centered(|ui| {
                                ui.add_space(20.0);
                                ui.colored_label(theme.card, "Nothing to do");
                            });
                        }
                        for (index, task) in tasks.iter().enumerate() {
                            self.render_task(ui, theme, task, index);
                            ui.add_space(5.0);
                        }
                    });

                ui.add_space(10.0);
                self.render_form(ui, theme);
            });
    }

    fn render_header(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        egui::Frame::none()
            .fill(theme.card)
            .rounding(10.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Todo")
                            .size(18.0)
                            .strong()
                            .color(theme.text_primary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").on_hover_text("Quit").clicked() {
                            self.actions.push(PanelAction::Quit);
                        }
                    });
                });
            });
    }

    fn render_task(&mut self, ui: &mut egui::Ui, theme: &Theme, task: &Task, index: usize) {
        let action = match TaskRow::show(ui, theme, task, index) {
            Some(action) => action,
            None => return,
        };

        self.actions.push(match action {
            TaskRowAction::SetChecked(checked) => PanelAction::SetChecked {
                id: task.id,
                checked,
            },
            TaskRowAction::Delete => PanelAction::RemoveTask(task.id),
            TaskRowAction::DropFrom(from) => PanelAction::MoveTask { from, to: index },
        });
    }

    fn render_form(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        egui::Frame::none()
            .fill(theme.card)
            .rounding(10.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());

                let input = ui.add(
                    egui::TextEdit::singleline(&mut self.draft)
                        .hint_text("New todo...")
                        .desired_width(f32::INFINITY)
                        .text_color(theme.text_primary),
                );
                let submitted =
                    input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                ui.checkbox(&mut self.draft_important, "Mark as important");
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let add = Self::filled_button(ui, "Add", theme.accent, theme.accent_hover);
                    if add.clicked() || submitted {
                        self.submit_draft();
                    }

                    let delete =
                        Self::filled_button(ui, "Delete checked", theme.danger, theme.danger_hover);
                    if delete.clicked() {
                        self.actions.push(PanelAction::RemoveChecked);
                    }
                });
            });
    }

    fn filled_button(
        ui: &mut egui::Ui,
        label: &str,
        fill: egui::Color32,
        hover: egui::Color32,
    ) -> egui::Response {
        // Hover state from the previous frame picks the fill color.
        let id = ui.next_auto_id().with("hovered");
        let hovered = ui.ctx().data(|d| d.get_temp::<bool>(id)).unwrap_or(false);

        let response = ui.add(
            egui::Button::new(egui::RichText::new(label).color(egui::Color32::WHITE))
                .fill(if hovered { hover } else { fill })
                .rounding(5.0),
        );
        ui.ctx()
            .data_mut(|d| d.insert_temp(id, response.hovered()));
        response
    }

    /// Queue the typed text as a new task and reset the form.
    pub fn submit_draft(&mut self) {
        if self.draft.trim().is_empty() {
            return;
        }

        let importance = if self.draft_important {
            Importance::Important
        } else {
            Importance::Normal
        };
        self.actions.push(PanelAction::AddTask {
            text: std::mem::take(&mut self.draft),
            importance,
        });
        self.draft_important = false;
    }

    /// Take all pending actions.
    pub fn take_actions(&mut self) -> Vec<PanelAction> {
        std::mem::take(&mut self.actions)
    }
}

impl Default for PanelView {
    fn default() -> Self {
        Self::new()
    }
}
