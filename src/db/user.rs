//! User model for Yatube.

use serde::Serialize;

/// User entity representing a registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Given name (may be empty).
    pub first_name: String,
    /// Family name (may be empty).
    pub last_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Account creation timestamp.
    pub date_joined: String,
}

impl User {
    /// Full name if any part of it is set, otherwise the username.
    pub fn display_name(&self) -> String {
        display_name(&self.username, &self.first_name, &self.last_name)
    }

    /// The parts of a user that are safe to hand to templates.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name(),
        }
    }
}

/// "First Last" when either part is set, otherwise the username.
pub(crate) fn display_name(username: &str, first_name: &str, last_name: &str) -> String {
    let full = format!("{} {}", first_name.trim(), last_name.trim());
    let full = full.trim();
    if full.is_empty() {
        username.to_string()
    } else {
        full.to_string()
    }
}

/// Template-facing view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Full name or username.
    pub display_name: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address (optional).
    pub email: Option<String>,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: None,
        }
    }

    /// Set the first and last name.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: &str, last: &str) -> User {
        User {
            id: 1,
            username: "leo".to_string(),
            password: "hash".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: None,
            is_active: true,
            date_joined: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_display_name_full() {
        assert_eq!(user("Leo", "Tolstoy").display_name(), "Leo Tolstoy");
    }

    #[test]
    fn test_display_name_partial() {
        assert_eq!(user("Leo", "").display_name(), "Leo");
        assert_eq!(user("", "Tolstoy").display_name(), "Tolstoy");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        assert_eq!(user("", " ").display_name(), "leo");
    }

    #[test]
    fn test_summary_omits_password() {
        let summary = user("Leo", "Tolstoy").summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["username"], "leo");
        assert_eq!(json["display_name"], "Leo Tolstoy");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_new_user_builder() {
        let new_user = NewUser::new("leo", "hash")
            .with_name("Leo", "Tolstoy")
            .with_email("leo@example.com");
        assert_eq!(new_user.username, "leo");
        assert_eq!(new_user.first_name, "Leo");
        assert_eq!(new_user.email.as_deref(), Some("leo@example.com"));
    }
}
