//! Error types for the todo API client.
//!
//! # Design
//! Every operation surfaces one of two failures a caller cares about: the
//! request never reached a server (`TransportUnavailable`) or the server
//! answered with a non-2xx status (`RequestFailed`). The status code and
//! status text travel with the error; error bodies are never parsed. The
//! two serde variants cover payloads that cannot be encoded or decoded.

use std::fmt;

/// The operation a `RequestFailed` error belongs to. Rendered into the
/// error message as "Failed to <operation>".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::List => "list todos",
            Operation::Create => "create todo",
            Operation::Update => "update todo",
            Operation::Delete => "delete todo",
        };
        f.write_str(label)
    }
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportUnavailable,
    RequestFailed,
    Deserialization,
    Serialization,
}

/// Errors returned by `TodoClient` parse methods and the async `ApiClient`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The request could not be executed: no usable origin, connection
    /// refused, or the response body could not be read.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The server returned a non-2xx status.
    #[error("Failed to {operation}: {status}{}", status_suffix(.status_text))]
    RequestFailed {
        operation: Operation,
        status: u16,
        status_text: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Non-standard statuses have no reason phrase; omit the separator then.
fn status_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" {status_text}")
    }
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportUnavailable(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::TransportUnavailable(_) => ErrorKind::TransportUnavailable,
            ApiError::RequestFailed { .. } => ErrorKind::RequestFailed,
            ApiError::Deserialization(_) => ErrorKind::Deserialization,
            ApiError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// HTTP status carried by a `RequestFailed` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_names_operation_and_status() {
        let err = ApiError::RequestFailed {
            operation: Operation::Create,
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to create todo: 500 Internal Server Error");
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn request_failed_without_status_text_has_no_trailing_space() {
        let err = ApiError::RequestFailed {
            operation: Operation::List,
            status: 599,
            status_text: String::new(),
        };
        assert_eq!(err.to_string(), "Failed to list todos: 599");
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::transport("connection refused");
        assert_eq!(err.kind(), ErrorKind::TransportUnavailable);
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }
}
