//! Request payloads and result values relayed to and from the backend.
//!
//! # Design
//! The payload types double as the front door's inbound bodies: whatever the
//! caller posts is forwarded field for field. Result types serialize to the
//! exact shapes callers of the relay receive.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::BackendFailure;

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/project`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub due_date: String,
}

/// Successful login result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginToken {
    pub token: String,
}

/// Shape of the backend's login reply. Only `accessToken` is read.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginReply {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Literal success indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confirmation {
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "Project deleted successfully.")]
    ProjectDeleted,
}

pub const PROJECT_MISSING: &str =
    "Something went wrong. A project with this id probably doesn't exist.";

/// Result of `get_project` on a 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectLookup {
    /// The backend's project object, passed through unchanged.
    Found(Value),
    /// A 2xx status other than 200.
    Missing,
}

impl Serialize for ProjectLookup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProjectLookup::Found(project) => project.serialize(serializer),
            ProjectLookup::Missing => serializer.serialize_str(PROJECT_MISSING),
        }
    }
}

/// Either the operation's success value or a status-driven failure.
///
/// Serializes untagged: the success value as-is, or
/// `{"error_message": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Success(T),
    Failure(BackendFailure),
}

impl<T> Outcome<T> {
    pub fn failure(&self) -> Option<BackendFailure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(*failure),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn confirmations_serialize_as_literal_strings() {
        assert_eq!(serde_json::to_value(Confirmation::Success).unwrap(), json!("Success"));
        assert_eq!(
            serde_json::to_value(Confirmation::ProjectDeleted).unwrap(),
            json!("Project deleted successfully.")
        );
    }

    #[test]
    fn outcome_success_serializes_inner_value() {
        let outcome = Outcome::Success(LoginToken { token: "t-1".to_string() });
        assert_eq!(serde_json::to_value(&outcome).unwrap(), json!({"token": "t-1"}));
    }

    #[test]
    fn outcome_failure_serializes_error_message() {
        let outcome: Outcome<Confirmation> = Outcome::Failure(BackendFailure::ServerError);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json["error_message"],
            "A server error occurred. If this continues, please contact a system administrator for assistance."
        );
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn missing_project_serializes_as_message() {
        assert_eq!(serde_json::to_value(ProjectLookup::Missing).unwrap(), json!(PROJECT_MISSING));
    }

    #[test]
    fn found_project_passes_through() {
        let project = json!({"id": 3, "name": "Thesis", "extra": [1, 2]});
        let lookup = ProjectLookup::Found(project.clone());
        assert_eq!(serde_json::to_value(lookup).unwrap(), project);
    }

    #[test]
    fn new_project_rejects_missing_owner() {
        let result: Result<NewProject, _> =
            serde_json::from_str(r#"{"name":"x","description":"y","due_date":"z"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn login_reply_reads_access_token() {
        let reply: LoginReply =
            serde_json::from_str(r#"{"accessToken":"abc","userId":7}"#).unwrap();
        assert_eq!(reply.access_token, "abc");
    }
}
