//! Application error types.
//!
//! Every store interaction in the service layer resolves to one of the
//! kinds below; callers (route handlers, the CLI) only ever see this
//! taxonomy, never a raw driver error.

use thiserror::Error;

/// Application-level errors for Rubric.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input failed validation (missing or malformed fields).
    #[error("Validation Error: {0}")]
    Invalid(String),

    /// A uniqueness constraint was violated.
    #[error("Duplicate Key Error: {0}")]
    AlreadyExists(String),

    /// A reference field held a malformed identifier.
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    /// A referenced or looked-up record does not exist.
    #[error("{0}")]
    ItemNotFound(String),

    /// Catch-all for any other store failure.
    #[error("{0}")]
    Unprocessable(String),

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Stable machine-readable code for each error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Invalid(_) => "INVALID",
            AppError::AlreadyExists(_) => "ALREADY_EXISTS",
            AppError::InvalidId(_) => "INVALID_ID",
            AppError::ItemNotFound(_) => "ITEM_NOT_FOUND",
            AppError::Unprocessable(_) => "UNPROCESSABLE",
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let err = AppError::Invalid("name is required".to_string());
        assert_eq!(err.to_string(), "Validation Error: name is required");
    }

    #[test]
    fn test_already_exists_display() {
        let err = AppError::AlreadyExists("Category with name already exists".to_string());
        assert_eq!(
            err.to_string(),
            "Duplicate Key Error: Category with name already exists"
        );
    }

    #[test]
    fn test_invalid_id_display() {
        let err = AppError::InvalidId("abc is not a valid ObjectId".to_string());
        assert_eq!(err.to_string(), "Invalid ID: abc is not a valid ObjectId");
    }

    #[test]
    fn test_codes() {
        assert_eq!(AppError::ItemNotFound(String::new()).code(), "ITEM_NOT_FOUND");
        assert_eq!(AppError::Unprocessable(String::new()).code(), "UNPROCESSABLE");
    }
}
