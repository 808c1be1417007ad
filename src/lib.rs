//! Project Desk: projects identified by six-digit codes, each with a list of
//! daily recurring tasks that roll over when they lapse.

pub mod error;
pub mod indexer;
pub mod io;
pub mod model;
pub mod projects;
pub mod recurring;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod store;

pub use error::{DeskError, StoreError, ValidationError};
pub use model::{CurrentUser, Project, ProjectCode, ProjectPatch, RecurringTask};
