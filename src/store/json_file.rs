use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use super::ProjectStore;
use crate::error::StoreError;
use crate::model::{Project, ProjectCode, ProjectPatch};

/// Keeps the whole project collection in one pretty-printed JSON file.
///
/// The file is read once on open. Every write serializes the updated
/// collection to a sibling temp file and renames it over the original; the
/// in-memory copy only changes after the rename succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    projects: Mutex<Vec<Project>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store. Keywords
    /// are rebuilt on load, so records written without them stay searchable.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut projects = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            serde_json::from_str::<Vec<Project>>(&json)?
        } else {
            Vec::new()
        };
        projects.iter_mut().for_each(Project::reindex);
        projects.sort_by_key(|p| p.code);
        info!(path = %path.display(), count = projects.len(), "opened project file");
        Ok(Self {
            path,
            projects: Mutex::new(projects),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Project>>, StoreError> {
        self.projects
            .lock()
            .map_err(|_| StoreError::Unavailable("project file lock poisoned".into()))
    }

    fn save(&self, projects: &[Project]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(projects)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), count = projects.len(), "saved project file");
        Ok(())
    }
}

impl ProjectStore for JsonFileStore {
    fn get_project(&self, code: ProjectCode) -> Result<Option<Project>, StoreError> {
        Ok(self.lock()?.iter().find(|p| p.code == code).cloned())
    }

    fn update_project(&self, code: ProjectCode, patch: &ProjectPatch) -> Result<(), StoreError> {
        let mut projects = self.lock()?;
        let mut updated = projects.clone();
        let project = updated
            .iter_mut()
            .find(|p| p.code == code)
            .ok_or(StoreError::Missing(code))?;
        project.apply(patch);
        self.save(&updated)?;
        *projects = updated;
        Ok(())
    }

    fn create_project(&self, project: &Project) -> Result<(), StoreError> {
        let mut projects = self.lock()?;
        let pos = match projects.binary_search_by_key(&project.code, |p| p.code) {
            Ok(_) => return Err(StoreError::AlreadyExists(project.code)),
            Err(pos) => pos,
        };
        let mut project = project.clone();
        project.reindex();
        let mut updated = projects.clone();
        updated.insert(pos, project);
        self.save(&updated)?;
        *projects = updated;
        Ok(())
    }

    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.lock()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::generate_keywords;
    use crate::model::RecurringTask;

    fn project(code: u32) -> Project {
        let code = ProjectCode::new(code).unwrap();
        Project {
            code,
            client: "Acme".into(),
            name: "Audit".into(),
            owner: "u-1".into(),
            note: String::new(),
            recurring_tasks: Vec::new(),
            date_created: 1_700_000_000_000,
            keywords: generate_keywords(code, "Acme", "Audit"),
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("projects.json")).unwrap();
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn writes_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("projects.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.create_project(&project(222222)).unwrap();
        store.create_project(&project(111111)).unwrap();
        let code = ProjectCode::new(111111).unwrap();
        store
            .update_project(
                code,
                &ProjectPatch::recurring_tasks(vec![RecurringTask::new("Backup", 42)]),
            )
            .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        let codes: Vec<u32> = reopened
            .list_projects()
            .unwrap()
            .iter()
            .map(|p| p.code.get())
            .collect();
        assert_eq!(codes, vec![111111, 222222]);
        let loaded = reopened.get_project(code).unwrap().unwrap();
        assert_eq!(loaded.recurring_tasks.len(), 1);
        assert_eq!(loaded.recurring_tasks[0].time, 42);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn records_without_keywords_are_searchable_after_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(
            &path,
            r#"[{"code":123456,"client":"Acme","name":"Audit","owner":"u","dateCreated":0}]"#,
        )
        .unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.list_projects().unwrap().len(), 1);
        assert_eq!(store.search_projects("").unwrap().len(), 1);
        assert_eq!(store.search_projects("acme").unwrap().len(), 1);
    }

    #[test]
    fn client_patch_without_keywords_updates_search() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("projects.json")).unwrap();
        let code = ProjectCode::new(123456).unwrap();
        store.create_project(&project(123456)).unwrap();

        let patch = ProjectPatch {
            client: Some("Globex".into()),
            ..Default::default()
        };
        store.update_project(code, &patch).unwrap();

        let loaded = store.get_project(code).unwrap().unwrap();
        assert_eq!(loaded.keywords, generate_keywords(code, "Globex", "Audit"));
        assert_eq!(store.search_projects("globex").unwrap().len(), 1);
        assert!(store.search_projects("acme").unwrap().is_empty());
    }

    #[test]
    fn duplicate_codes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("projects.json")).unwrap();
        store.create_project(&project(123456)).unwrap();
        assert!(matches!(
            store.create_project(&project(123456)),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn updating_an_unknown_code_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("projects.json")).unwrap();
        let code = ProjectCode::new(999999).unwrap();
        assert!(matches!(
            store.update_project(code, &ProjectPatch::note("x")),
            Err(StoreError::Missing(c)) if c == code
        ));
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Serde(_))));
    }
}
