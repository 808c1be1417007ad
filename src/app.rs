use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing::warn;
use uuid::Uuid;

use project_desk::error::{DeskError, Field};
use project_desk::model::{Project, ProjectCode};
use project_desk::projects::{self, ProjectForm};
use project_desk::recurring::{self, RecurringTaskList};
use project_desk::session::{LocalSession, Session};
use project_desk::settings::{ColorMode, Settings, SettingsFile};
use project_desk::store::ProjectStore;

use crate::pending::{Pending, Poll};
use crate::ui;

/// Inline messages for the fields of one form.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<(Field, &'static str)>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, msg)| *msg)
    }

    pub fn set(&mut self, field: Field, message: &'static str) {
        self.clear(field);
        self.0.push((field, message));
    }

    pub fn clear(&mut self, field: Field) {
        self.0.retain(|(f, _)| *f != field);
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }
}

/// The project currently shown in the central panel.
pub struct OpenProject {
    pub project: Project,
    pub tasks: RecurringTaskList,
    pub note_draft: String,
    pub client_draft: String,
    pub name_draft: String,
    pub new_task_text: String,
    pub new_task_time: String,
    pub errors: FieldErrors,
}

impl OpenProject {
    fn new(project: Project) -> Self {
        Self {
            tasks: RecurringTaskList::for_project(&project),
            note_draft: project.note.clone(),
            client_draft: project.client.clone(),
            name_draft: project.name.clone(),
            new_task_text: String::new(),
            new_task_time: "07:30".to_string(),
            errors: FieldErrors::default(),
            project,
        }
    }
}

/// Main application state.
pub struct DeskApp {
    pub store: Arc<dyn ProjectStore>,
    pub data_file: PathBuf,
    pub settings_file: SettingsFile,
    pub settings: Settings,
    pub session: LocalSession,

    pub projects: Vec<Project>,
    pub search_query: String,
    pub open: Option<OpenProject>,

    // Dialog state
    pub show_create_project: bool,
    pub create_form: ProjectForm,
    pub create_errors: FieldErrors,
    pub pending_create: Option<Pending<Result<Project, DeskError>>>,
    pub show_account: bool,
    pub account_name: String,
    pub show_about: bool,

    // Sign-in screen
    pub sign_in_name: String,
    pub sign_in_email: String,
    pub sign_in_errors: FieldErrors,

    // Status message
    pub status_message: String,
}

impl DeskApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: Arc<dyn ProjectStore>,
        data_file: PathBuf,
        settings_file: SettingsFile,
        settings: Settings,
        status_message: String,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_store(store, data_file, settings_file, settings, status_message)
    }

    /// App state without any window attached.
    pub fn with_store(
        store: Arc<dyn ProjectStore>,
        data_file: PathBuf,
        settings_file: SettingsFile,
        settings: Settings,
        status_message: String,
    ) -> Self {
        let session = LocalSession::new(settings.user.clone());
        let mut app = Self {
            store,
            data_file,
            settings_file,
            settings,
            session,
            projects: Vec::new(),
            search_query: String::new(),
            open: None,
            show_create_project: false,
            create_form: ProjectForm::default(),
            create_errors: FieldErrors::default(),
            pending_create: None,
            show_account: false,
            account_name: String::new(),
            show_about: false,
            sign_in_name: String::new(),
            sign_in_email: String::new(),
            sign_in_errors: FieldErrors::default(),
            status_message,
        };
        app.refresh_projects();
        app
    }

    pub fn color_mode(&self) -> ColorMode {
        self.settings.color_mode
    }

    fn save_settings(&mut self) {
        self.settings.user = self.session.current_user();
        if let Err(e) = self.settings_file.save(&self.settings) {
            warn!(error = %e, "failed to save settings");
            self.status_message = format!("Settings not saved: {}", e);
        }
    }

    // --- Account ---

    pub fn sign_in(&mut self) {
        self.sign_in_errors.clear_all();
        match self.session.sign_in(&self.sign_in_name, &self.sign_in_email) {
            Ok(user) => {
                self.sign_in_name.clear();
                self.sign_in_email.clear();
                self.save_settings();
                self.refresh_projects();
                self.status_message = format!("Signed in as {}", user.email);
            }
            Err(e) => self.report_inline(e, Target::SignIn),
        }
    }

    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.open = None;
        self.show_account = false;
        self.show_create_project = false;
        self.save_settings();
        self.status_message = "Signed out".to_string();
    }

    pub fn open_account_settings(&mut self) {
        if let Some(user) = self.session.current_user() {
            self.account_name = user.display_name;
            self.show_account = true;
        }
    }

    pub fn save_account(&mut self) {
        match self.session.update_profile(&self.account_name) {
            Ok(_) => {
                self.show_account = false;
                self.save_settings();
                self.status_message = "Account updated".to_string();
            }
            Err(e) => self.status_message = e.user_message().to_string(),
        }
    }

    pub fn toggle_color_mode(&mut self) {
        self.settings.color_mode = self.settings.color_mode.toggled();
        self.save_settings();
    }

    // --- Project list ---

    pub fn refresh_projects(&mut self) {
        match projects::search_projects(self.store.as_ref(), &self.search_query) {
            Ok(list) => self.projects = list,
            Err(e) => {
                warn!(error = %e, "failed to list projects");
                self.status_message = e.user_message().to_string();
            }
        }
    }

    /// Load a project into the central panel and roll its recurring tasks
    /// forward once.
    pub fn open_project(&mut self, code: ProjectCode) {
        let project = match projects::load_project(self.store.as_ref(), code) {
            Ok(project) => project,
            Err(e) => {
                self.status_message = e.user_message().to_string();
                self.refresh_projects();
                return;
            }
        };
        let mut open = OpenProject::new(project);
        let rolled = open.tasks.roll_over(self.store.as_ref(), &Local::now());
        match &rolled {
            Ok(true) => self.status_message = format!("Recurring tasks of {} rolled over", code),
            Ok(false) => self.status_message = format!("Opened {}", open.project.title()),
            Err(e) => self.status_message = e.user_message().to_string(),
        }
        self.open = Some(open);
        if let Ok(true) = rolled {
            self.sync_open_tasks();
        }
    }

    /// Copy the open task list into its project and reload the side panel,
    /// so the dashboard summary matches what was just saved.
    fn sync_open_tasks(&mut self) {
        if let Some(open) = self.open.as_mut() {
            open.project.recurring_tasks = open.tasks.tasks().to_vec();
        }
        self.refresh_projects();
    }

    pub fn new_project(&mut self) {
        if self.session.current_user().is_none() {
            return;
        }
        self.create_form = ProjectForm::default();
        self.create_errors.clear_all();
        self.show_create_project = true;
    }

    pub fn submit_create_project(&mut self, ctx: &egui::Context) {
        if self.pending_create.is_some() {
            return;
        }
        let user = match self.session.require_user() {
            Ok(user) => user,
            Err(e) => {
                self.status_message = e.user_message().to_string();
                return;
            }
        };
        if let Err(e) = self.create_form.validate() {
            self.report_inline(e.into(), Target::CreateProject);
            return;
        }
        let store = Arc::clone(&self.store);
        let form = self.create_form.clone();
        self.pending_create = Some(Pending::spawn(ctx, move || {
            projects::create_project(store.as_ref(), &user, &form, &Local::now())
        }));
    }

    fn poll_pending_create(&mut self) {
        let result = match self.pending_create.as_ref().map(Pending::poll) {
            None | Some(Poll::Waiting) => return,
            Some(Poll::Lost) => {
                self.pending_create = None;
                self.status_message = project_desk::error::alerts::SAVE_FAILED.to_string();
                return;
            }
            Some(Poll::Done(result)) => result,
        };
        self.pending_create = None;
        match result {
            Ok(project) => {
                self.show_create_project = false;
                self.create_form = ProjectForm::default();
                self.status_message = format!("Created {}", project.title());
                self.refresh_projects();
                self.open_project(project.code);
            }
            // The dialog may have been closed while the write was in flight.
            Err(e) if self.show_create_project => self.report_inline(e, Target::CreateProject),
            Err(e) => self.status_message = e.user_message().to_string(),
        }
    }

    pub fn export_csv(&mut self) {
        let all = match self.store.list_projects() {
            Ok(all) => all,
            Err(e) => {
                self.status_message = format!("CSV export failed: {}", e);
                return;
            }
        };
        if all.is_empty() {
            self.status_message = "Nothing to export, there are no projects".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("projects.csv")
            .save_file()
        {
            match project_desk::io::export_csv(&all, &path) {
                Ok(count) => self.status_message = format!("Exported {} projects to CSV", count),
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        let dir = self
            .data_file
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        if let Err(e) = open::that(&dir) {
            self.status_message = format!("Cannot open {}: {}", dir.display(), e);
        }
    }

    // --- Open project operations ---

    pub fn save_note(&mut self) {
        let Some(open) = self.open.as_mut() else { return };
        match projects::update_note(self.store.as_ref(), open.project.code, &open.note_draft) {
            Ok(()) => {
                open.project.note = open.note_draft.clone();
                self.status_message = "Note saved".to_string();
            }
            Err(e) => self.status_message = e.user_message().to_string(),
        }
    }

    pub fn save_details(&mut self) {
        let Some(open) = self.open.as_mut() else { return };
        open.errors.clear(Field::Client);
        open.errors.clear(Field::Name);
        match projects::rename_project(
            self.store.as_ref(),
            open.project.code,
            &open.client_draft,
            &open.name_draft,
        ) {
            Ok(project) => {
                open.project.client = project.client;
                open.project.name = project.name;
                open.project.keywords = project.keywords;
                self.status_message = "Project details saved".to_string();
                self.refresh_projects();
            }
            Err(e) => {
                if let Some(field) = e.field() {
                    open.errors.set(field, e.user_message());
                }
                self.status_message = e.user_message().to_string();
            }
        }
    }

    pub fn add_recurring_task(&mut self) {
        let Some(open) = self.open.as_mut() else { return };
        open.errors.clear(Field::Task);
        open.errors.clear(Field::Time);
        let problems = recurring::check_new_task(&open.new_task_text, &open.new_task_time);
        if !problems.is_empty() {
            for problem in problems {
                open.errors.set(problem.field(), problem.user_message());
            }
            return;
        }
        match open.tasks.append(
            self.store.as_ref(),
            &open.new_task_text,
            &open.new_task_time,
            &Local::now(),
        ) {
            Ok(()) => {
                open.new_task_text.clear();
                self.status_message = "Recurring task added".to_string();
                self.sync_open_tasks();
            }
            Err(e) => {
                if let Some(field) = e.field() {
                    open.errors.set(field, e.user_message());
                }
                self.status_message = e.user_message().to_string();
            }
        }
    }

    pub fn toggle_recurring_task(&mut self, index: usize, id: Uuid) {
        let Some(open) = self.open.as_mut() else { return };
        match open.tasks.toggle_done(self.store.as_ref(), index, Some(id)) {
            Ok(()) => self.sync_open_tasks(),
            Err(e) => self.status_message = e.user_message().to_string(),
        }
    }

    pub fn delete_recurring_task(&mut self, index: usize, id: Uuid) {
        let Some(open) = self.open.as_mut() else { return };
        match open.tasks.delete(self.store.as_ref(), index, Some(id)) {
            Ok(removed) => {
                self.status_message = format!("Deleted '{}'", removed.task);
                self.sync_open_tasks();
            }
            Err(e) => self.status_message = e.user_message().to_string(),
        }
    }

    fn report_inline(&mut self, err: DeskError, target: Target) {
        let errors = match target {
            Target::SignIn => &mut self.sign_in_errors,
            Target::CreateProject => &mut self.create_errors,
        };
        match err.field() {
            Some(field) => errors.set(field, err.user_message()),
            None => self.status_message = err.user_message().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Target {
    SignIn,
    CreateProject,
}

impl eframe::App for DeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx, self.color_mode());
        self.poll_pending_create();

        let palette = ui::theme::palette(self.color_mode());

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(palette.bg_base)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(palette.text_secondary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Projects: {}", self.projects.len()))
                                .size(10.5)
                                .color(palette.text_dim),
                        );
                    });
                });
            });

        if self.session.current_user().is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui::dialogs::show_sign_in(self, ui);
            });
            return;
        }

        // Left panel: search + project list
        let mut list_action = ui::project_list::ProjectListAction::None;
        egui::SidePanel::left("project_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(palette.bg_panel)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, palette.border_subtle)),
            )
            .show(ctx, |ui| {
                list_action = ui::project_list::show_project_list(
                    &self.projects,
                    self.open.as_ref().map(|o| o.project.code),
                    &mut self.search_query,
                    palette,
                    ui,
                );
            });

        match list_action {
            ui::project_list::ProjectListAction::Select(code) => self.open_project(code),
            ui::project_list::ProjectListAction::SearchChanged => self.refresh_projects(),
            ui::project_list::ProjectListAction::Create => self.new_project(),
            ui::project_list::ProjectListAction::None => {}
        }

        // Central panel: dashboard or the open project
        let mut view_action = ui::project_view::ProjectViewAction::None;
        egui::CentralPanel::default()
            .frame(
                egui::Frame::default()
                    .fill(palette.bg_base)
                    .inner_margin(egui::Margin::same(16.0)),
            )
            .show(ctx, |ui| match self.open.as_mut() {
                Some(open) => {
                    view_action = ui::project_view::show_project_view(open, palette, ui);
                }
                None => ui::project_view::show_dashboard(&self.projects, palette, ui),
            });

        match view_action {
            ui::project_view::ProjectViewAction::SaveNote => self.save_note(),
            ui::project_view::ProjectViewAction::SaveDetails => self.save_details(),
            ui::project_view::ProjectViewAction::AddTask => self.add_recurring_task(),
            ui::project_view::ProjectViewAction::Toggle(index, id) => {
                self.toggle_recurring_task(index, id)
            }
            ui::project_view::ProjectViewAction::Delete(index, id) => {
                self.delete_recurring_task(index, id)
            }
            ui::project_view::ProjectViewAction::Close => self.open = None,
            ui::project_view::ProjectViewAction::None => {}
        }

        // Dialogs
        if self.show_create_project {
            ui::dialogs::show_create_project_dialog(self, ctx);
        }
        if self.show_account {
            ui::dialogs::show_account_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use project_desk::indexer::generate_keywords;
    use project_desk::model::RecurringTask;
    use project_desk::store::MemoryStore;

    fn code() -> ProjectCode {
        ProjectCode::new(123456).unwrap()
    }

    fn app_with(tasks: Vec<RecurringTask>) -> (DeskApp, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::with_projects([Project {
            code: code(),
            client: "Acme".into(),
            name: "Audit".into(),
            owner: "u-1".into(),
            note: String::new(),
            recurring_tasks: tasks,
            date_created: 0,
            keywords: generate_keywords(code(), "Acme", "Audit"),
        }]);
        let app = DeskApp::with_store(
            Arc::new(store),
            dir.path().join("projects.json"),
            SettingsFile::in_dir(dir.path()),
            Settings::default(),
            String::new(),
        );
        (app, dir)
    }

    fn listed_tasks(app: &DeskApp) -> &[RecurringTask] {
        &app.projects[0].recurring_tasks
    }

    #[test]
    fn rollover_on_open_reaches_the_open_project_and_the_list() {
        let (mut app, _dir) = app_with(vec![RecurringTask::new("Backup", 0)]);
        assert!(listed_tasks(&app)[0].done);

        app.open_project(code());

        let open = app.open.as_ref().unwrap();
        assert!(!open.project.recurring_tasks[0].done);
        assert_eq!(open.project.recurring_tasks, open.tasks.tasks());

        app.open = None;
        assert!(!listed_tasks(&app)[0].done);
        assert!(listed_tasks(&app)[0].time > 0);
    }

    #[test]
    fn task_changes_refresh_the_project_list() {
        let tomorrow = (Local::now() + Duration::days(1)).timestamp_millis();
        let task = RecurringTask::new("Backup", tomorrow);
        let id = task.id;
        let (mut app, _dir) = app_with(vec![task]);
        app.open_project(code());

        app.toggle_recurring_task(0, id);
        assert!(!listed_tasks(&app)[0].done);

        {
            let open = app.open.as_mut().unwrap();
            open.new_task_text = "Report".into();
            open.new_task_time = "09:00".into();
        }
        app.add_recurring_task();
        assert_eq!(listed_tasks(&app).len(), 2);

        app.delete_recurring_task(0, id);
        let names: Vec<&str> = listed_tasks(&app).iter().map(|t| t.task.as_str()).collect();
        assert_eq!(names, vec!["Report"]);
        assert_eq!(app.open.as_ref().unwrap().project.recurring_tasks.len(), 1);
    }
}
