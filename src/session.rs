//! Who is using the dashboard.
//!
//! There is no remote identity provider: signing in records a local profile
//! that is saved with the settings. Everything that needs an owner receives
//! the [`CurrentUser`] explicitly.

use tracing::info;
use uuid::Uuid;

use crate::error::{DeskError, Field, ValidationError};
use crate::model::CurrentUser;

pub trait Session {
    /// The signed-in user, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<CurrentUser>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalSession {
    user: Option<CurrentUser>,
}

fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Empty {
            field: Field::Email,
        });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email.to_string())
        }
        _ => Err(ValidationError::InvalidEmail(email.to_string())),
    }
}

fn validate_display_name(display_name: &str) -> Result<String, ValidationError> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(ValidationError::Empty {
            field: Field::DisplayName,
        });
    }
    Ok(display_name.to_string())
}

impl LocalSession {
    pub fn new(user: Option<CurrentUser>) -> Self {
        Self { user }
    }

    /// Sign in as `email`. Signing in again with the same email keeps the
    /// user id, so previously created projects stay owned by them.
    pub fn sign_in(&mut self, display_name: &str, email: &str) -> Result<CurrentUser, DeskError> {
        let display_name = validate_display_name(display_name)?;
        let email = validate_email(email)?;
        let id = match &self.user {
            Some(existing) if existing.email.eq_ignore_ascii_case(&email) => existing.id.clone(),
            _ => Uuid::new_v4().to_string(),
        };
        let user = CurrentUser {
            id,
            display_name,
            email,
        };
        info!(user = %user.id, "signed in");
        self.user = Some(user.clone());
        Ok(user)
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "signed out");
        }
    }

    /// Account settings: change the display name of the signed-in user.
    pub fn update_profile(&mut self, display_name: &str) -> Result<CurrentUser, DeskError> {
        let display_name = validate_display_name(display_name)?;
        let user = self.user.as_mut().ok_or(DeskError::Unauthenticated)?;
        user.display_name = display_name;
        Ok(user.clone())
    }

    /// The signed-in user, or [`DeskError::Unauthenticated`].
    pub fn require_user(&self) -> Result<CurrentUser, DeskError> {
        self.current_user().ok_or(DeskError::Unauthenticated)
    }
}

impl Session for LocalSession {
    fn current_user(&self) -> Option<CurrentUser> {
        self.user.clone()
    }
}
