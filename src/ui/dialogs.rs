use crate::app::DeskApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Ui, Window};
use project_desk::error::Field;
use project_desk::session::Session;

fn field_error(ui: &mut Ui, color: Color32, message: Option<&str>) {
    if let Some(message) = message {
        ui.label(RichText::new(message).size(10.5).color(color));
    }
}

/// Render the "Create Project" dialog.
pub fn show_create_project_dialog(app: &mut DeskApp, ctx: &Context) {
    let mut should_close = false;
    let mut submit = false;
    let palette = theme::palette(app.color_mode());
    let busy = app.pending_create.is_some();

    Window::new(RichText::new("Create new project").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new("To create a new project record, please fill all required fields")
                    .size(11.0)
                    .color(palette.text_secondary),
            );
            ui.add_space(6.0);

            egui::Grid::new("create_project_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Project code").color(palette.text_secondary));
                    ui.vertical(|ui| {
                        let resp = ui.add_enabled(
                            !busy,
                            egui::TextEdit::singleline(&mut app.create_form.code)
                                .hint_text("123456")
                                .desired_width(200.0),
                        );
                        if resp.changed() {
                            app.create_errors.clear(Field::Code);
                        }
                        field_error(ui, palette.danger, app.create_errors.get(Field::Code));
                    });
                    ui.end_row();

                    ui.label(RichText::new("Client").color(palette.text_secondary));
                    ui.vertical(|ui| {
                        ui.add_enabled(
                            !busy,
                            egui::TextEdit::singleline(&mut app.create_form.client).desired_width(200.0),
                        );
                        field_error(ui, palette.danger, app.create_errors.get(Field::Client));
                    });
                    ui.end_row();

                    ui.label(RichText::new("Name").color(palette.text_secondary));
                    ui.vertical(|ui| {
                        ui.add_enabled(
                            !busy,
                            egui::TextEdit::singleline(&mut app.create_form.name).desired_width(200.0),
                        );
                        field_error(ui, palette.danger, app.create_errors.get(Field::Name));
                    });
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let enabled = !busy && app.create_form.is_complete();
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(palette.accent)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_enabled_ui(enabled, |ui| ui.add_sized([80.0, 28.0], create_btn)).inner.clicked() {
                    submit = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
                if busy {
                    ui.add(egui::Spinner::new().size(18.0));
                }
            });
            ui.add_space(2.0);
        });

    if submit {
        app.submit_create_project(ctx);
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_create_project = false;
    }
}

/// Render the account settings dialog.
pub fn show_account_dialog(app: &mut DeskApp, ctx: &Context) {
    let mut should_close = false;
    let mut save = false;
    let palette = theme::palette(app.color_mode());
    let email = app
        .session
        .current_user()
        .map(|u| u.email)
        .unwrap_or_default();

    Window::new(RichText::new("Account settings").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("account_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Email").color(palette.text_secondary));
                    ui.label(&email);
                    ui.end_row();

                    ui.label(RichText::new("Display name").color(palette.text_secondary));
                    ui.add(egui::TextEdit::singleline(&mut app.account_name).desired_width(200.0));
                    ui.end_row();
                });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Save")).clicked() {
                    save = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
        });

    if save {
        app.save_account();
    }
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_account = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut DeskApp, ctx: &Context) {
    let mut should_close = false;
    let palette = theme::palette(app.color_mode());
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Project Desk").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(palette.text_secondary),
                );
                ui.add_space(10.0);
                ui.label("Projects and daily recurring tasks,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Sign-in screen shown in place of the dashboard when nobody is signed in.
pub fn show_sign_in(app: &mut DeskApp, ui: &mut Ui) {
    let palette = theme::palette(app.color_mode());
    let mut submit = false;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.2);
        ui.heading(RichText::new("Sign in").strong());
        ui.add_space(12.0);

        ui.label(RichText::new("Display name").color(palette.text_secondary));
        ui.add(egui::TextEdit::singleline(&mut app.sign_in_name).desired_width(260.0));
        field_error(ui, palette.danger, app.sign_in_errors.get(Field::DisplayName));
        ui.add_space(6.0);

        ui.label(RichText::new("Email address").color(palette.text_secondary));
        let email = ui.add(egui::TextEdit::singleline(&mut app.sign_in_email).desired_width(260.0));
        field_error(ui, palette.danger, app.sign_in_errors.get(Field::Email));
        ui.add_space(10.0);

        let enter = email.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let btn = egui::Button::new(RichText::new("Sign in").color(Color32::WHITE)).fill(palette.accent);
        if ui.add_sized([260.0, 30.0], btn).clicked() || enter {
            submit = true;
        }
    });
    if submit {
        app.sign_in();
    }
}
