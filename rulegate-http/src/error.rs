// Error types for the HTTP validation adapter

use rulegate_core::ValidatorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("no redirect destination configured for validation group '{0}'")]
    MissingRedirect(String),

    #[error("Validation error: {0}")]
    Validator(#[from] ValidatorError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl HttpError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            HttpError::BadRequest(_) => 400,
            HttpError::Deserialization(_) => 400,

            // Default to 500 for unmapped errors
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(HttpError::BadRequest("x".to_string()).status_code(), 400);
        assert_eq!(HttpError::Deserialization("x".to_string()).status_code(), 400);
        assert_eq!(
            HttpError::MissingRedirect("save".to_string()).status_code(),
            500
        );
        assert_eq!(
            HttpError::Validator(ValidatorError::UnknownGroup("x".to_string())).status_code(),
            500
        );
    }

    #[test]
    fn test_validator_errors_convert() {
        let err: HttpError = ValidatorError::UnknownGroup("save".to_string()).into();
        assert!(matches!(
            err,
            HttpError::Validator(ValidatorError::UnknownGroup(_))
        ));
    }
}
