//! Project persistence behind a small trait so the dashboard logic does not
//! care where projects live.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::indexer;
use crate::model::{Project, ProjectCode, ProjectPatch};

pub trait ProjectStore: Send + Sync {
    /// Look up a project by code. `Ok(None)` when it does not exist.
    fn get_project(&self, code: ProjectCode) -> Result<Option<Project>, StoreError>;

    /// Apply a partial update. Fails with [`StoreError::Missing`] when the
    /// project does not exist.
    fn update_project(&self, code: ProjectCode, patch: &ProjectPatch) -> Result<(), StoreError>;

    /// Insert a new project. Fails with [`StoreError::AlreadyExists`] when
    /// the code is taken.
    fn create_project(&self, project: &Project) -> Result<(), StoreError>;

    /// All projects, ordered by code.
    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    /// Projects whose stored keywords contain `query`, ordered by code.
    fn search_projects(&self, query: &str) -> Result<Vec<Project>, StoreError> {
        let mut projects = self.list_projects()?;
        projects.retain(|p| indexer::matches_query(&p.keywords, query));
        Ok(projects)
    }
}
