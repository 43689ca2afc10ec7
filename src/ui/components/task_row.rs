//! Task row UI component.
//!
//! Renders a single task with its checkbox, drag handle and delete button.

use crate::tasks::Task;
use crate::ui::theme::Theme;
use eframe::egui;

/// Actions that can be triggered from a task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskRowAction {
    /// Checkbox changed to the given value
    SetChecked(bool),
    /// Delete button clicked
    Delete,
    /// The row dragged from this position was dropped on this row
    DropFrom(usize),
}

/// Task row component.
pub struct TaskRow;

impl TaskRow {
    /// Render a task row at list position `index` and return any action triggered.
    pub fn show(
        ui: &mut egui::Ui,
        theme: &Theme,
        task: &Task,
        index: usize,
    ) -> Option<TaskRowAction> {
        let mut action = None;

        let frame = egui::Frame::none()
            .fill(theme.card)
            .rounding(8.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    // Drag handle; the payload is the row's current position
                    let drag_id = egui::Id::new(("task-row", task.id.get()));
                    ui.dnd_drag_source(drag_id, index, |ui| {
                        ui.label(egui::RichText::new("☰").color(theme.text_done));
                    });

                    let mut checked = task.checked;
                    if ui.checkbox(&mut checked, "").changed() {
                        action = Some(TaskRowAction::SetChecked(checked));
                    }

                    let mut text = egui::RichText::new(&task.text)
                        .size(14.0)
                        .color(theme.task_color(task.importance, task.checked));
                    if task.checked {
                        text = text.strikethrough();
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").on_hover_text("Delete").clicked() {
                            action = Some(TaskRowAction::Delete);
                        }
                        ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                            ui.add(egui::Label::new(text).wrap());
                        });
                    });
                });
            });

        if let Some(from) = frame.response.dnd_release_payload::<usize>() {
            if *from != index {
                action = Some(TaskRowAction::DropFrom(*from));
            }
        }

        action
    }
}
