use crate::ui::theme::{self, Palette};
use egui::{Color32, RichText, Ui};
use project_desk::model::{Project, ProjectCode};

/// Actions that the project list can request.
pub enum ProjectListAction {
    None,
    Select(ProjectCode),
    SearchChanged,
    Create,
}

/// Render the left-side search box and project list.
pub fn show_project_list(
    projects: &[Project],
    selected: Option<ProjectCode>,
    search_query: &mut String,
    palette: &Palette,
    ui: &mut Ui,
) -> ProjectListAction {
    let mut action = ProjectListAction::None;

    // Header area
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Projects")
                .strong()
                .size(15.0)
                .color(palette.text_primary),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", projects.len()))
                .size(11.0)
                .color(palette.text_dim),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  New Project", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(palette.accent)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = ProjectListAction::Create;
    }
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS).color(palette.text_dim));
        let search = ui.add(
            egui::TextEdit::singleline(search_query)
                .hint_text("Search code, client or name...")
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            action = ProjectListAction::SearchChanged;
        }
    });

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    if projects.is_empty() {
        ui.label(RichText::new("No projects found").color(palette.text_dim));
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, project) in projects.iter().enumerate() {
                let is_selected = selected == Some(project.code);
                let row_bg = if is_selected {
                    palette.bg_selected
                } else if i % 2 == 0 {
                    palette.bg_panel
                } else {
                    palette.bg_base
                };

                let frame_resp = egui::Frame::default()
                    .fill(row_bg)
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 4.0))
                    .show(ui, |ui| {
                        ui.set_min_height(theme::ROW_HEIGHT);
                        ui.set_width(ui.available_width());
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(project.code.to_string())
                                    .monospace()
                                    .size(11.0)
                                    .color(palette.text_secondary),
                            );
                            ui.add(
                                egui::Label::new(
                                    RichText::new(format!("{} - {}", project.client, project.name))
                                        .size(12.0)
                                        .color(palette.text_primary),
                                )
                                .truncate(),
                            );
                        });
                    });

                // Make entire row clickable
                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("project-row", project.code.get())),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = ProjectListAction::Select(project.code);
                }
                ui.add_space(1.0);
            }
        });

    action
}
