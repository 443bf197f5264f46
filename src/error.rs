//! Error types for Yatube.

use thiserror::Error;

/// Common error type for Yatube.
#[derive(Error, Debug)]
pub enum YatubeError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A unique value is already taken.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Template loading or rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for YatubeError {
    fn from(e: sqlx::Error) -> Self {
        YatubeError::Database(e.to_string())
    }
}

impl From<tera::Error> for YatubeError {
    fn from(e: tera::Error) -> Self {
        // tera keeps the useful part (which template, which variable) in the source chain
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        YatubeError::Template(message)
    }
}

/// Result type alias for Yatube operations.
pub type Result<T> = std::result::Result<T, YatubeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = YatubeError::Auth("invalid token".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid token");
    }

    #[test]
    fn test_validation_error_display() {
        let err = YatubeError::Validation("text is required".to_string());
        assert_eq!(err.to_string(), "validation error: text is required");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = YatubeError::NotFound("group".to_string());
        assert_eq!(err.to_string(), "group not found");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = YatubeError::Conflict("user".to_string());
        assert_eq!(err.to_string(), "user already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: YatubeError = io_err.into();
        assert!(matches!(err, YatubeError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: YatubeError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, YatubeError::Database(_)));
    }

    #[test]
    fn test_tera_error_conversion() {
        let err: YatubeError = tera::Error::msg("missing variable").into();
        assert!(matches!(err, YatubeError::Template(_)));
        assert!(err.to_string().contains("missing variable"));
    }
}
