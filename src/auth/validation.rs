//! Input validation for signup.
//!
//! Username, password, name and email rules.

use thiserror::Error;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length of first and last name.
pub const MAX_NAME_LENGTH: usize = 150;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username may contain only letters, digits and @/./+/-/_ characters")]
    UsernameInvalidChars,

    /// Username collides with a route segment or system name.
    #[error("this username is reserved")]
    UsernameReserved,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,

    /// Password is the same as username.
    #[error("password cannot be the same as username")]
    PasswordSameAsUsername,

    /// Password confirmation does not match.
    #[error("the two password fields didn't match")]
    PasswordMismatch,

    /// First or last name is too long.
    #[error("name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("enter a valid email address")]
    EmailInvalidFormat,
}

impl ValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::UsernameTooShort
            | ValidationError::UsernameTooLong
            | ValidationError::UsernameInvalidChars
            | ValidationError::UsernameReserved => "username",
            ValidationError::PasswordTooShort
            | ValidationError::PasswordTooLong
            | ValidationError::PasswordSameAsUsername => "password1",
            ValidationError::PasswordMismatch => "password2",
            ValidationError::NameTooLong => "name",
            ValidationError::EmailTooLong | ValidationError::EmailInvalidFormat => "email",
        }
    }
}

const RESERVED_USERNAMES: &[&str] = &["admin", "root", "system", "anonymous"];

/// Check if a username is reserved.
pub fn is_reserved_username(username: &str) -> bool {
    let lower = username.to_lowercase();
    RESERVED_USERNAMES.iter().any(|&r| r == lower)
}

/// Validate a username.
///
/// # Examples
///
/// ```
/// use yatube::auth::validation::validate_username;
///
/// assert!(validate_username("leo.tolstoy").is_ok());
/// assert!(validate_username("ab").is_err());
/// assert!(validate_username("with space").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if len < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if len > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    if is_reserved_username(username) {
        return Err(ValidationError::UsernameReserved);
    }

    Ok(())
}

/// Validate a password and its confirmation.
pub fn validate_password(
    password: &str,
    confirmation: &str,
    username: &str,
) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    if password.eq_ignore_ascii_case(username) {
        return Err(ValidationError::PasswordSameAsUsername);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Validate first or last name length.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

/// Validate an email address (loose structural check).
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::EmailInvalidFormat);
    };

    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || email.chars().any(char::is_whitespace)
    {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Validate every signup field, collecting all failures.
pub fn validate_signup(
    username: &str,
    password: &str,
    confirmation: &str,
    first_name: &str,
    last_name: &str,
    email: Option<&str>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_username(username) {
        errors.push(e);
    }
    if let Err(e) = validate_password(password, confirmation, username) {
        errors.push(e);
    }
    if let Err(e) = validate_name(first_name).and_then(|_| validate_name(last_name)) {
        errors.push(e);
    }
    if let Some(email) = email {
        if let Err(e) = validate_email(email) {
            errors.push(e);
        }
    }

    errors
}
