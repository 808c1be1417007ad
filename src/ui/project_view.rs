use chrono::{Local, TimeZone};
use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use uuid::Uuid;

use crate::app::OpenProject;
use crate::ui::theme::Palette;
use project_desk::error::Field;
use project_desk::model::Project;

/// Actions that the project view can request.
pub enum ProjectViewAction {
    None,
    SaveNote,
    SaveDetails,
    AddTask,
    Toggle(usize, Uuid),
    Delete(usize, Uuid),
    Close,
}

fn card<R>(palette: &Palette, ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::default()
        .fill(palette.bg_panel)
        .stroke(egui::Stroke::new(1.0, palette.border_subtle))
        .rounding(egui::Rounding::same(6.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

fn field_error(palette: &Palette, ui: &mut Ui, message: Option<&str>) {
    if let Some(message) = message {
        ui.label(RichText::new(message).size(10.5).color(palette.danger));
    }
}

/// Landing view when no project is open.
pub fn show_dashboard(projects: &[Project], palette: &Palette, ui: &mut Ui) {
    ui.heading("Dashboard");
    ui.add_space(8.0);
    card(palette, ui, |ui| {
        ui.label(RichText::new("Projects").strong());
        ui.add_space(4.0);
        let tasks: usize = projects.iter().map(|p| p.recurring_tasks.len()).sum();
        let open: usize = projects
            .iter()
            .flat_map(|p| &p.recurring_tasks)
            .filter(|t| !t.done)
            .count();
        ui.label(format!("{} projects, {} recurring tasks", projects.len(), tasks));
        if open > 0 {
            ui.label(
                RichText::new(format!("{} tasks waiting to be checked off", open))
                    .color(palette.accent),
            );
        } else if tasks > 0 {
            ui.label(RichText::new("Everything is checked off").color(palette.success));
        }
        ui.add_space(4.0);
        ui.label(
            RichText::new("Pick a project on the left to see its recurring tasks.")
                .color(palette.text_secondary),
        );
    });
}

/// Render the open project: details, note and recurring tasks.
pub fn show_project_view(open: &mut OpenProject, palette: &Palette, ui: &mut Ui) -> ProjectViewAction {
    let mut action = ProjectViewAction::None;

    ui.horizontal(|ui| {
        ui.heading(open.project.title());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Close").clicked() {
                action = ProjectViewAction::Close;
            }
        });
    });
    if let Some(created) = Local.timestamp_millis_opt(open.project.date_created).single() {
        ui.label(
            RichText::new(format!("Created {}", created.format("%Y-%m-%d %H:%M")))
                .size(11.0)
                .color(palette.text_dim),
        );
    }
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // ── Details ──────────────────────────────────────────────────
            card(palette, ui, |ui| {
                ui.label(RichText::new("Details").strong());
                egui::Grid::new("project_details_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Client").color(palette.text_secondary));
                        ui.vertical(|ui| {
                            ui.add(egui::TextEdit::singleline(&mut open.client_draft).desired_width(240.0));
                            field_error(palette, ui, open.errors.get(Field::Client));
                        });
                        ui.end_row();

                        ui.label(RichText::new("Name").color(palette.text_secondary));
                        ui.vertical(|ui| {
                            ui.add(egui::TextEdit::singleline(&mut open.name_draft).desired_width(240.0));
                            field_error(palette, ui, open.errors.get(Field::Name));
                        });
                        ui.end_row();
                    });
                let changed = open.client_draft != open.project.client
                    || open.name_draft != open.project.name;
                if ui.add_enabled(changed, egui::Button::new("Save details")).clicked() {
                    action = ProjectViewAction::SaveDetails;
                }
            });
            ui.add_space(10.0);

            // ── Note ─────────────────────────────────────────────────────
            card(palette, ui, |ui| {
                ui.label(RichText::new("Note").strong());
                ui.add(
                    egui::TextEdit::multiline(&mut open.note_draft)
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
                let changed = open.note_draft != open.project.note;
                if ui
                    .add_enabled(
                        changed,
                        egui::Button::new(format!("{} Save note", egui_phosphor::regular::FLOPPY_DISK)),
                    )
                    .clicked()
                {
                    action = ProjectViewAction::SaveNote;
                }
            });
            ui.add_space(10.0);

            // ── Recurring tasks ──────────────────────────────────────────
            card(palette, ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Recurring Tasks").strong());
                    ui.label(RichText::new(egui_phosphor::regular::INFO).color(palette.text_dim))
                        .on_hover_text("The checkbox clears itself every day at the chosen time");
                });
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut open.new_task_text)
                                .hint_text("Task")
                                .desired_width(260.0),
                        );
                        if resp.changed() {
                            open.errors.clear(Field::Task);
                        }
                        field_error(palette, ui, open.errors.get(Field::Task));
                    });
                    ui.vertical(|ui| {
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut open.new_task_time)
                                .hint_text("HH:MM")
                                .desired_width(70.0),
                        );
                        if resp.changed() {
                            open.errors.clear(Field::Time);
                        }
                        field_error(palette, ui, open.errors.get(Field::Time));
                    });
                    let btn = egui::Button::new(
                        RichText::new(format!("{} Create Task", egui_phosphor::regular::PLUS))
                            .color(Color32::WHITE),
                    )
                    .fill(palette.accent);
                    if ui.add(btn).clicked() {
                        action = ProjectViewAction::AddTask;
                    }
                });
                ui.add_space(6.0);

                if open.tasks.is_empty() {
                    ui.label(RichText::new("No recurring tasks yet").color(palette.text_dim));
                    return;
                }

                TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::exact(40.0))
                    .column(Column::remainder().at_least(120.0))
                    .column(Column::auto().at_least(120.0))
                    .column(Column::exact(32.0))
                    .header(20.0, |mut header| {
                        header.col(|ui| {
                            ui.label(RichText::new("DONE").size(9.0).color(palette.text_dim));
                        });
                        header.col(|ui| {
                            ui.label(RichText::new("TASK").size(9.0).color(palette.text_dim));
                        });
                        header.col(|ui| {
                            ui.label(RichText::new("NEXT DUE").size(9.0).color(palette.text_dim));
                        });
                        header.col(|_| {});
                    })
                    .body(|mut body| {
                        for (index, task) in open.tasks.tasks().iter().enumerate() {
                            body.row(26.0, |mut row| {
                                row.col(|ui| {
                                    let mut done = task.done;
                                    if ui.checkbox(&mut done, "").changed() {
                                        action = ProjectViewAction::Toggle(index, task.id);
                                    }
                                });
                                row.col(|ui| {
                                    let color = if task.done {
                                        palette.text_secondary
                                    } else {
                                        palette.text_primary
                                    };
                                    ui.add(egui::Label::new(RichText::new(&task.task).color(color)).truncate());
                                });
                                row.col(|ui| {
                                    let due = Local
                                        .timestamp_millis_opt(task.time)
                                        .single()
                                        .map(|d| d.format("%a %d %b, %H:%M").to_string())
                                        .unwrap_or_default();
                                    ui.label(RichText::new(due).size(11.0).color(palette.text_secondary));
                                });
                                row.col(|ui| {
                                    let del = ui.add(
                                        egui::Button::new(
                                            RichText::new(egui_phosphor::regular::TRASH)
                                                .color(palette.danger),
                                        )
                                        .frame(false),
                                    );
                                    if del.on_hover_text("Delete task").clicked() {
                                        action = ProjectViewAction::Delete(index, task.id);
                                    }
                                });
                            });
                        }
                    });
            });
        });

    action
}
