use std::fmt;

use serde::{Deserialize, Serialize};

use super::recurring_task::RecurringTask;
use crate::error::ValidationError;
use crate::indexer;

/// Unique six-digit project identifier, `100000..=999999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ProjectCode(u32);

impl ProjectCode {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    pub fn new(value: u32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Parse user input: exactly six ASCII digits, no leading zero.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidCode(input.to_string()));
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ValidationError::InvalidCode(input.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ProjectCode {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| ValidationError::InvalidCode(value.to_string()))
    }
}

impl From<ProjectCode> for u32 {
    fn from(code: ProjectCode) -> Self {
        code.0
    }
}

impl fmt::Display for ProjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tracked work record as stored in the project collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub code: ProjectCode,
    pub client: String,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub recurring_tasks: Vec<RecurringTask>,
    /// Milliseconds since the Unix epoch.
    pub date_created: i64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Project {
    /// "123456 - Client - Name", as shown in lists and window titles.
    pub fn title(&self) -> String {
        format!("{} - {} - {}", self.code, self.client, self.name)
    }

    /// Rebuild `keywords` from the current code, client and name.
    pub fn reindex(&mut self) {
        self.keywords = indexer::generate_keywords(self.code, &self.client, &self.name);
    }

    /// Overwrite the fields present in `patch`. Keywords are always derived:
    /// touching client, name or keywords rebuilds them from the result.
    pub fn apply(&mut self, patch: &ProjectPatch) {
        if let Some(client) = &patch.client {
            self.client = client.clone();
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(note) = &patch.note {
            self.note = note.clone();
        }
        if let Some(tasks) = &patch.recurring_tasks {
            self.recurring_tasks = tasks.clone();
        }
        if patch.client.is_some() || patch.name.is_some() || patch.keywords.is_some() {
            self.reindex();
        }
    }
}

/// Partial update of a [`Project`]. `code`, `owner` and `date_created` are
/// fixed at creation and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_tasks: Option<Vec<RecurringTask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl ProjectPatch {
    pub fn recurring_tasks(tasks: Vec<RecurringTask>) -> Self {
        Self {
            recurring_tasks: Some(tasks),
            ..Default::default()
        }
    }

    pub fn note(note: impl Into<String>) -> Self {
        Self {
            note: Some(note.into()),
            ..Default::default()
        }
    }
}
