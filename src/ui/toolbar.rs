use crate::app::DeskApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use project_desk::session::Session;
use project_desk::settings::ColorMode;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut DeskApp, ui: &mut Ui) {
    let user = app.session.current_user();
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            let signed_in = user.is_some();
            if ui
                .add_enabled(signed_in, egui::Button::new("  New Project..."))
                .clicked()
            {
                app.new_project();
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(signed_in, egui::Button::new("  Export CSV..."))
                .clicked()
            {
                app.export_csv();
                ui.close_menu();
            }
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            let mode = app.color_mode();
            if ui.radio(mode == ColorMode::Dark, "Dark").clicked() && mode != ColorMode::Dark {
                app.toggle_color_mode();
                ui.close_menu();
            }
            if ui.radio(mode == ColorMode::Light, "Light").clicked() && mode != ColorMode::Light {
                app.toggle_color_mode();
                ui.close_menu();
            }
        });

        if user.is_some() {
            ui.menu_button(RichText::new("  Account  ").font(theme::font_menu()), |ui| {
                if ui.button("  Settings...").clicked() {
                    app.open_account_settings();
                    ui.close_menu();
                }
                if ui
                    .button(format!("  {} Sign Out", egui_phosphor::regular::SIGN_OUT))
                    .clicked()
                {
                    app.sign_out();
                    ui.close_menu();
                }
            });
        }

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned avatar
        if let Some(user) = &user {
            let palette = theme::palette(app.color_mode());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&user.email).size(11.0).color(palette.text_secondary));
                ui.label(
                    RichText::new(user.initials())
                        .strong()
                        .background_color(palette.accent)
                        .color(egui::Color32::WHITE),
                )
                .on_hover_text(&user.display_name);
            });
        }
    });
}
