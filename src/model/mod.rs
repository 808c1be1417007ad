pub mod project;
pub mod recurring_task;
pub mod user;

pub use project::{Project, ProjectCode, ProjectPatch};
pub use recurring_task::RecurringTask;
pub use user::CurrentUser;
