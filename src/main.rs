#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod pending;
mod ui;

use std::sync::Arc;

use project_desk::settings::SettingsFile;
use project_desk::store::{JsonFileStore, MemoryStore, ProjectStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "project_desk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings_file = SettingsFile::default_location();
    let settings = settings_file.load();
    let data_file = settings_file.data_file(&settings);

    let (store, status): (Arc<dyn ProjectStore>, String) = match JsonFileStore::open(&data_file) {
        Ok(store) => {
            tracing::info!(path = %data_file.display(), "project data loaded");
            (Arc::new(store) as Arc<dyn ProjectStore>, "Ready".to_string())
        }
        Err(e) => {
            tracing::error!(path = %data_file.display(), error = %e, "cannot open project data, changes will not be saved");
            (
                Arc::new(MemoryStore::new()) as Arc<dyn ProjectStore>,
                format!("Cannot open {}: {}. Changes will not be saved", data_file.display(), e),
            )
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([800.0, 480.0])
            .with_title("Project Desk"),
        ..Default::default()
    };

    eframe::run_native(
        "Project Desk",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::DeskApp::new(
                cc,
                store,
                data_file,
                settings_file,
                settings,
                status,
            )))
        }),
    )
}
