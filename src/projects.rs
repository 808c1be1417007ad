//! Project-level operations: create, load, rename, notes, search.

use chrono::{DateTime, TimeZone};
use tracing::{info, warn};

use crate::error::{DeskError, Field, ValidationError};
use crate::indexer;
use crate::model::{CurrentUser, Project, ProjectCode, ProjectPatch};
use crate::store::ProjectStore;

/// Raw values from the "create project" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub code: String,
    pub client: String,
    pub name: String,
}

impl ProjectForm {
    /// Cheap check used to enable the submit button.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(ProjectCode, String, String), ValidationError> {
        let code = ProjectCode::parse(&self.code)?;
        let (client, name) = validate_names(&self.client, &self.name)?;
        Ok((code, client, name))
    }
}

fn validate_names(client: &str, name: &str) -> Result<(String, String), ValidationError> {
    let client = client.trim();
    if client.is_empty() {
        return Err(ValidationError::Empty {
            field: Field::Client,
        });
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Empty { field: Field::Name });
    }
    Ok((client.to_string(), name.to_string()))
}

/// Validate the form and create the project owned by `user`.
pub fn create_project<Tz: TimeZone>(
    store: &dyn ProjectStore,
    user: &CurrentUser,
    form: &ProjectForm,
    now: &DateTime<Tz>,
) -> Result<Project, DeskError> {
    let (code, client, name) = form.validate()?;
    let project = Project {
        code,
        keywords: indexer::generate_keywords(code, &client, &name),
        client,
        name,
        owner: user.id.clone(),
        note: String::new(),
        recurring_tasks: Vec::new(),
        date_created: now.timestamp_millis(),
    };
    match store.create_project(&project) {
        Ok(()) => {
            info!(code = %project.code, owner = %project.owner, "created project");
            Ok(project)
        }
        Err(err) => {
            warn!(code = %project.code, error = %err, "failed to create project");
            Err(err.into())
        }
    }
}

pub fn load_project(store: &dyn ProjectStore, code: ProjectCode) -> Result<Project, DeskError> {
    store.get_project(code)?.ok_or(DeskError::NotFound { code })
}

/// Change client and name. Keywords are rebuilt in the same update.
pub fn rename_project(
    store: &dyn ProjectStore,
    code: ProjectCode,
    client: &str,
    name: &str,
) -> Result<Project, DeskError> {
    let (client, name) = validate_names(client, name)?;
    let patch = ProjectPatch {
        keywords: Some(indexer::generate_keywords(code, &client, &name)),
        client: Some(client),
        name: Some(name),
        ..Default::default()
    };
    store.update_project(code, &patch)?;
    info!(%code, "renamed project");
    load_project(store, code)
}

pub fn update_note(
    store: &dyn ProjectStore,
    code: ProjectCode,
    note: &str,
) -> Result<(), DeskError> {
    store.update_project(code, &ProjectPatch::note(note))?;
    info!(%code, "updated project note");
    Ok(())
}

pub fn search_projects(store: &dyn ProjectStore, query: &str) -> Result<Vec<Project>, DeskError> {
    Ok(store.search_projects(query)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn user() -> CurrentUser {
        CurrentUser {
            id: "user-42".into(),
            display_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
        }
    }

    fn form(code: &str, client: &str, name: &str) -> ProjectForm {
        ProjectForm {
            code: code.into(),
            client: client.into(),
            name: name.into(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    // -- create ----------------------------------------------------------------

    #[test]
    fn create_fills_derived_fields() {
        let store = MemoryStore::new();
        let project = create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap();

        assert_eq!(project.owner, "user-42");
        assert_eq!(project.note, "");
        assert!(project.recurring_tasks.is_empty());
        assert_eq!(project.date_created, now().timestamp_millis());
        assert_eq!(
            project.keywords,
            indexer::generate_keywords(project.code, "Acme", "Audit")
        );
        assert_eq!(store.get_project(project.code).unwrap(), Some(project));
    }

    #[test]
    fn invalid_forms_never_reach_the_store() {
        let store = MemoryStore::new();
        let cases = [
            (form("12345", "Acme", "Audit"), Field::Code),
            (form("1234567", "Acme", "Audit"), Field::Code),
            (form("abcdef", "Acme", "Audit"), Field::Code),
            (form("123456", "", "Audit"), Field::Client),
            (form("123456", "Acme", "   "), Field::Name),
        ];
        for (form, field) in cases {
            assert!(!form.is_complete());
            let err = create_project(&store, &user(), &form, &now()).unwrap_err();
            assert_eq!(err.field(), Some(field), "{form:?}");
        }
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn duplicate_code_is_reported_on_the_code_field() {
        let store = MemoryStore::new();
        create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap();
        let err =
            create_project(&store, &user(), &form("123456", "Globex", "Other"), &now()).unwrap_err();
        assert!(matches!(
            err,
            DeskError::Validation(ValidationError::DuplicateCode(_))
        ));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn store_failure_is_a_persistence_error() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let err = create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap_err();
        assert!(matches!(err, DeskError::Persistence(_)));
    }

    // -- load / rename / note ------------------------------------------------

    #[test]
    fn load_unknown_code_is_not_found() {
        let store = MemoryStore::new();
        let code = ProjectCode::new(555555).unwrap();
        assert!(matches!(
            load_project(&store, code),
            Err(DeskError::NotFound { code: c }) if c == code
        ));
    }

    #[test]
    fn rename_regenerates_keywords() {
        let store = MemoryStore::new();
        let created = create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap();

        let renamed = rename_project(&store, created.code, "Globex", "Migration").unwrap();

        assert_eq!(renamed.client, "Globex");
        assert_eq!(
            renamed.keywords,
            indexer::generate_keywords(created.code, "Globex", "Migration")
        );
        assert!(!renamed.keywords.contains(&"acme".to_string()));
        assert_eq!(renamed.date_created, created.date_created);
    }

    #[test]
    fn rename_rejects_empty_names() {
        let store = MemoryStore::new();
        let created = create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap();
        assert!(rename_project(&store, created.code, "Acme", "").is_err());
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn note_is_saved() {
        let store = MemoryStore::new();
        let created = create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap();
        update_note(&store, created.code, "call the client").unwrap();
        assert_eq!(load_project(&store, created.code).unwrap().note, "call the client");
    }

    #[test]
    fn search_goes_through_keywords() {
        let store = MemoryStore::new();
        create_project(&store, &user(), &form("123456", "Acme", "Audit"), &now()).unwrap();
        create_project(&store, &user(), &form("654321", "Globex", "Audit"), &now()).unwrap();

        assert_eq!(search_projects(&store, "aud").unwrap().len(), 2);
        assert_eq!(search_projects(&store, "GLOBEX").unwrap().len(), 1);
        assert_eq!(search_projects(&store, "6543").unwrap().len(), 1);
    }
}
