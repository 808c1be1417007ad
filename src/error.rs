use crate::model::ProjectCode;

/// Messages shown next to form fields and in the status bar.
pub mod alerts {
    pub const EMPTY_FIELD: &str = "Field cannot be empty";
    pub const INVALID_PROJECT_CODE: &str = "Project code must be exactly 6 digits";
    pub const PROJECT_CODE_ALREADY_EXISTS: &str = "Project code already exists";
    pub const INVALID_TIME: &str = "Use a 24-hour time like 07:30";
    pub const INVALID_EMAIL: &str = "Enter a valid email address";
    pub const STALE_TASK_LIST: &str = "The task list changed, please try again";
    pub const PROJECT_NOT_FOUND: &str = "Project not found";
    pub const NOT_SIGNED_IN: &str = "You need to sign in first";
    pub const SAVE_FAILED: &str = "Something went wrong, changes were not saved";
}

/// Form fields a validation failure can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Client,
    Name,
    Task,
    Time,
    Position,
    DisplayName,
    Email,
}

/// Local input checks that failed before anything was written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field:?} cannot be empty")]
    Empty { field: Field },

    #[error("project code must be exactly 6 digits, got {0:?}")]
    InvalidCode(String),

    #[error("project code {0} already exists")]
    DuplicateCode(ProjectCode),

    #[error("invalid time of day {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error("{0:?} does not exist in the local time zone")]
    NonexistentLocalTime(String),

    #[error("task position {index} is out of range for {len} tasks")]
    PositionOutOfRange { index: usize, len: usize },

    #[error("task at position {index} is not the expected task")]
    StalePosition { index: usize },

    #[error("invalid email address {0:?}")]
    InvalidEmail(String),
}

impl ValidationError {
    /// The form field this error should be shown on.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::Empty { field } => *field,
            ValidationError::InvalidCode(_) | ValidationError::DuplicateCode(_) => Field::Code,
            ValidationError::InvalidTime(_) | ValidationError::NonexistentLocalTime(_) => {
                Field::Time
            }
            ValidationError::PositionOutOfRange { .. } | ValidationError::StalePosition { .. } => {
                Field::Position
            }
            ValidationError::InvalidEmail(_) => Field::Email,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::Empty { .. } => alerts::EMPTY_FIELD,
            ValidationError::InvalidCode(_) => alerts::INVALID_PROJECT_CODE,
            ValidationError::DuplicateCode(_) => alerts::PROJECT_CODE_ALREADY_EXISTS,
            ValidationError::InvalidTime(_) | ValidationError::NonexistentLocalTime(_) => {
                alerts::INVALID_TIME
            }
            ValidationError::PositionOutOfRange { .. } | ValidationError::StalePosition { .. } => {
                alerts::STALE_TASK_LIST
            }
            ValidationError::InvalidEmail(_) => alerts::INVALID_EMAIL,
        }
    }
}

/// Failures reported by a [`crate::store::ProjectStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("project {0} does not exist")]
    Missing(ProjectCode),

    #[error("project {0} already exists")]
    AlreadyExists(ProjectCode),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed project data: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Error returned by every user-triggered operation.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("project {code} not found")]
    NotFound { code: ProjectCode },

    #[error("persistence failed: {0}")]
    Persistence(#[source] StoreError),

    #[error("no user is signed in")]
    Unauthenticated,
}

impl From<StoreError> for DeskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(code) => DeskError::NotFound { code },
            StoreError::AlreadyExists(code) => {
                DeskError::Validation(ValidationError::DuplicateCode(code))
            }
            other => DeskError::Persistence(other),
        }
    }
}

impl DeskError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DeskError::Validation(err) => err.user_message(),
            DeskError::NotFound { .. } => alerts::PROJECT_NOT_FOUND,
            DeskError::Persistence(_) => alerts::SAVE_FAILED,
            DeskError::Unauthenticated => alerts::NOT_SIGNED_IN,
        }
    }

    /// The offending form field, for errors that belong inline.
    pub fn field(&self) -> Option<Field> {
        match self {
            DeskError::Validation(err) => Some(err.field()),
            _ => None,
        }
    }
}

/// Failures while writing a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while saving the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to write settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode settings: {0}")]
    Serde(#[from] serde_json::Error),
}
