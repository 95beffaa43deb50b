//! Catch-all failure type for front door handlers.
//!
//! Anything that stops a request from being relayed ends up here and is
//! answered as plain text `API Error\n<detail>`, never as a dropped
//! connection. Backend-reported failures are not errors at this layer; they
//! travel inside `Outcome`.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::RelayError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ApiFailure {
    /// Body, query string or path could not be read.
    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The blocking worker running the backend call panicked or was cancelled.
    #[error("request handler failed: {0}")]
    Internal(String),
}

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiFailure::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiFailure::Relay(RelayError::Unreachable(_))
            | ApiFailure::Relay(RelayError::Body(_))
            | ApiFailure::Relay(RelayError::Deserialization(_)) => StatusCode::BAD_GATEWAY,
            ApiFailure::Relay(RelayError::Serialization(_)) | ApiFailure::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        ApiFailure::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        ApiFailure::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiFailure {
    fn from(rejection: PathRejection) -> Self {
        ApiFailure::BadRequest(rejection.body_text())
    }
}

impl From<JoinError> for ApiFailure {
    fn from(err: JoinError) -> Self {
        ApiFailure::Internal(err.to_string())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, %status, "request failed");
        } else {
            tracing::warn!(error = %self, %status, "request rejected");
        }
        (status, format!("API Error\n{self}")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_backend_is_bad_gateway() {
        let failure = ApiFailure::from(RelayError::Unreachable("connection refused".to_string()));
        assert_eq!(failure.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(failure.to_string(), "backend unreachable: connection refused");
    }

    #[test]
    fn undecodable_backend_body_is_bad_gateway() {
        let failure = ApiFailure::from(RelayError::Deserialization("eof".to_string()));
        assert_eq!(failure.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unreadable_backend_body_is_bad_gateway() {
        let failure = ApiFailure::from(RelayError::Body("body exceeds limit".to_string()));
        assert_eq!(failure.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            failure.to_string(),
            "backend response unreadable: body exceeds limit"
        );
    }

    #[test]
    fn malformed_request_is_bad_request() {
        let failure = ApiFailure::BadRequest("missing field `email`".to_string());
        assert_eq!(failure.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn response_body_is_prefixed_text() {
        let response = ApiFailure::Internal("worker panicked".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}
