use serde::{Deserialize, Serialize};

/// The signed-in user, passed explicitly to operations that record ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
    pub email: String,
}

impl CurrentUser {
    /// Up to two uppercase initials for the avatar, e.g. "Ada Lovelace" -> "AL".
    pub fn initials(&self) -> String {
        let initials: String = self
            .display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            self.email.chars().take(1).flat_map(char::to_uppercase).collect()
        } else {
            initials
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display_name: &str, email: &str) -> CurrentUser {
        CurrentUser {
            id: "u-1".into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    #[test]
    fn initials_use_first_two_words() {
        assert_eq!(user("ada king lovelace", "a@b.c").initials(), "AK");
        assert_eq!(user("Grace", "g@b.c").initials(), "G");
    }

    #[test]
    fn initials_fall_back_to_email() {
        assert_eq!(user("  ", "zed@example.com").initials(), "Z");
    }
}
