//! Error types for the backend client.
//!
//! # Design
//! Two families are kept apart. `BackendFailure` is what the backend told us
//! through its status code; it is a normal result, rendered to the caller as
//! `{"error_message": ...}`. `RelayError` means the relay itself could not
//! complete the exchange (backend unreachable, unreadable body) and is
//! propagated as `Err`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Status-driven failure classes. `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BackendFailure {
    /// Registration answered 401.
    #[error("Error: account already exists for this email.")]
    AccountExists,

    /// Login answered 401.
    #[error("Login attempt failed. Check your username and password.")]
    LoginRejected,

    /// A token-protected route answered 401.
    #[error("Invalid access token. Please login again.")]
    InvalidToken,

    /// No access token was supplied; no request was sent.
    #[error("Please provide an access token.")]
    MissingToken,

    /// The backend answered 500.
    #[error("A server error occurred. If this continues, please contact a system administrator for assistance.")]
    ServerError,

    /// Any other status.
    #[error("An unknown error occurred. If this continues, please contact a system administrator for assistance.")]
    Unknown,
}

impl BackendFailure {
    /// Classify a non-success status. `unauthorized` is the operation's
    /// meaning for 401, or `None` when the operation has no special case.
    pub fn from_status(status: u16, unauthorized: Option<BackendFailure>) -> Self {
        match (status, unauthorized) {
            (401, Some(failure)) => failure,
            (500, _) => BackendFailure::ServerError,
            _ => BackendFailure::Unknown,
        }
    }
}

impl Serialize for BackendFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("error_message", &self.to_string())?;
        map.end()
    }
}

/// Failures that prevent an exchange with the backend from completing.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection refused, DNS failure or a broken request.
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    /// The backend answered but its body could not be read in full, for
    /// example because it exceeded the transport's size limit.
    #[error("backend response unreadable: {0}")]
    Body(String),

    /// The outbound payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 200 response carried a body we could not decode.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_uses_operation_meaning() {
        assert_eq!(
            BackendFailure::from_status(401, Some(BackendFailure::LoginRejected)),
            BackendFailure::LoginRejected
        );
        assert_eq!(BackendFailure::from_status(401, None), BackendFailure::Unknown);
    }

    #[test]
    fn server_error_wins_regardless_of_operation() {
        assert_eq!(
            BackendFailure::from_status(500, Some(BackendFailure::InvalidToken)),
            BackendFailure::ServerError
        );
    }

    #[test]
    fn other_statuses_are_unknown() {
        for status in [400, 403, 404, 502, 503] {
            assert_eq!(
                BackendFailure::from_status(status, Some(BackendFailure::InvalidToken)),
                BackendFailure::Unknown,
                "status {status}"
            );
        }
    }

    #[test]
    fn serializes_as_error_message_object() {
        let json = serde_json::to_value(BackendFailure::InvalidToken).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error_message": "Invalid access token. Please login again."})
        );
    }
}
