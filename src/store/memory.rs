use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::ProjectStore;
use crate::error::StoreError;
use crate::model::{Project, ProjectCode, ProjectPatch};

/// In-process store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: Mutex<BTreeMap<ProjectCode, Project>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.projects.lock() {
            map.extend(projects.into_iter().map(|mut p| {
                p.reindex();
                (p.code, p)
            }));
        }
        store
    }

    /// Number of successful create/update calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following write fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<ProjectCode, Project>>, StoreError> {
        self.projects
            .lock()
            .map_err(|_| StoreError::Unavailable("project map lock poisoned".into()))
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("writes are disabled".into()))
        } else {
            Ok(())
        }
    }
}

impl ProjectStore for MemoryStore {
    fn get_project(&self, code: ProjectCode) -> Result<Option<Project>, StoreError> {
        Ok(self.lock()?.get(&code).cloned())
    }

    fn update_project(&self, code: ProjectCode, patch: &ProjectPatch) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut projects = self.lock()?;
        let project = projects.get_mut(&code).ok_or(StoreError::Missing(code))?;
        project.apply(patch);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn create_project(&self, project: &Project) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut projects = self.lock()?;
        if projects.contains_key(&project.code) {
            return Err(StoreError::AlreadyExists(project.code));
        }
        let mut project = project.clone();
        project.reindex();
        projects.insert(project.code, project);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
