//! Error types shared by the client, the query layer and the console.

use thiserror::Error;

/// Failure of a single backend proxy call.
///
/// Errors are `Clone` because one failed fetch is observed by every
/// subscriber of the same query key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The proxy answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response (connect, DNS, timeout).
    #[error("{message}")]
    Transport { message: String, cause: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String, cause: String },

    /// Rejected before any I/O, e.g. an empty path identifier.
    #[error("Invalid request: {0}")]
    InvalidInput(String),
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// The user-facing message, i.e. what a toast or error panel shows.
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message, .. }
            | Self::Transport { message, .. }
            | Self::Decode { message, .. } => message,
            Self::InvalidInput(reason) => reason,
        }
    }

    /// HTTP status for proxy errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Client-side form validation failures. These never reach the query layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{field} must be valid JSON: {reason}")]
    InvalidJson { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = ClientError::api(404, "X not found");
        assert_eq!(err.to_string(), "X not found");
        assert_eq!(err.message(), "X not found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_transport_error_hides_cause_from_display() {
        let err = ClientError::Transport {
            message: "Failed to fetch tables".to_string(),
            cause: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch tables");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::required("Bucket name");
        assert_eq!(err.to_string(), "Bucket name is required");

        let err = ValidationError::InvalidJson {
            field: "Policy document".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("must be valid JSON"));
    }
}
