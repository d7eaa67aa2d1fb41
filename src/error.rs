//! Error types shared by the client, store and screen

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::Operation;

/// Failure of a single remote call
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("{operation} rejected with status {status}")]
    Rejected {
        operation: Operation,
        status: StatusCode,
    },
    /// The call never completed (connect, timeout, decoding)
    #[error("{operation} failed: {message}")]
    Transport {
        operation: Operation,
        message: String,
    },
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Rejected { operation, .. } | ApiError::Transport { operation, .. } => {
                *operation
            }
        }
    }

    /// Human-readable text for the error channel
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { operation, .. } => operation.rejection_message().to_string(),
            ApiError::Transport { message, .. } => format!("Network error: {}", message),
        }
    }
}

/// Caller errors detected before any request is issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("account has no id and cannot be edited")]
    MissingId,
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_names_operation() {
        let err = ApiError::Rejected {
            operation: Operation::StatusUpdate,
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.user_message(), "Failed to update account status");
        assert_eq!(err.operation(), Operation::StatusUpdate);
    }

    #[test]
    fn test_transport_message_includes_cause() {
        let err = ApiError::Transport {
            operation: Operation::Fetch,
            message: "Connection failed: refused".to_string(),
        };
        assert_eq!(err.user_message(), "Network error: Connection failed: refused");
    }
}
