//! User signup for Yatube.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_signup, ValidationError};
use crate::auth::{hash_password, PasswordError};
use crate::db::{NewUser, User, UserRepository};
use crate::YatubeError;

/// Signup-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// One or more fields failed validation.
    #[error("invalid signup data: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// Username already exists.
    #[error("a user with that username already exists")]
    UsernameExists,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Signup request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub password_confirmation: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional email address.
    pub email: Option<String>,
}

impl RegistrationRequest {
    /// Create a request whose confirmation equals the password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            password_confirmation: password.clone(),
            password,
            first_name: String::new(),
            last_name: String::new(),
            email: None,
        }
    }

    /// Set the password confirmation.
    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirmation = confirmation.into();
        self
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

/// Register a new user.
///
/// Validates every field, rejects taken usernames, hashes the password and
/// stores the user.
pub async fn register(
    repo: &UserRepository<'_>,
    request: RegistrationRequest,
) -> Result<User, RegistrationError> {
    let username = request.username.trim();
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let errors = validate_signup(
        username,
        &request.password,
        &request.password_confirmation,
        request.first_name.trim(),
        request.last_name.trim(),
        email,
    );
    if !errors.is_empty() {
        return Err(RegistrationError::Invalid(errors));
    }

    if repo
        .username_exists(username)
        .await
        .map_err(|e| RegistrationError::Database(e.to_string()))?
    {
        return Err(RegistrationError::UsernameExists);
    }

    let password_hash = hash_password(&request.password)?;

    let mut new_user = NewUser::new(username, password_hash)
        .with_name(request.first_name.trim(), request.last_name.trim());
    if let Some(email) = email {
        new_user = new_user.with_email(email);
    }

    // a concurrent signup can take the name after the check above
    let user = repo.create(&new_user).await.map_err(|e| match e {
        YatubeError::Conflict(_) => RegistrationError::UsernameExists,
        other => RegistrationError::Database(other.to_string()),
    })?;

    info!(username = %user.username, user_id = user.id, "New user registered");

    Ok(user)
}
