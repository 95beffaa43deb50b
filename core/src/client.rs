//! Stateless request builder and response classifier for the backend API.
//!
//! # Design
//! `BackendClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that turns an `HttpResponse` into an `Outcome`. Backend-reported statuses
//! become `Outcome::Failure`; only undecodable 200 bodies become `Err`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{BackendFailure, RelayError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Confirmation, Credentials, LoginReply, LoginToken, NewProject, Outcome, ProjectLookup,
    Registration,
};

/// Host the relay forwards to unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "http://senior-design.timblin.org";

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
}

impl Default for BackendClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_register(&self, input: &Registration) -> Result<HttpRequest, RelayError> {
        self.json_post("/api/register", input)
    }

    pub fn build_login(&self, input: &Credentials) -> Result<HttpRequest, RelayError> {
        self.json_post("/api/login", input)
    }

    pub fn build_list_users(&self, access_token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.with_token("/api/user", access_token),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_project(&self, input: &NewProject) -> Result<HttpRequest, RelayError> {
        self.json_post("/api/project", input)
    }

    pub fn build_get_project(&self, project_id: u64, access_token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.with_token(&format!("/api/project/{project_id}"), access_token),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_delete_project(&self, project_id: u64, access_token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.with_token(&format!("/api/project/{project_id}"), access_token),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_register(&self, response: HttpResponse) -> Outcome<Confirmation> {
        if response.status == 200 {
            return Outcome::Success(Confirmation::Success);
        }
        Outcome::Failure(BackendFailure::from_status(
            response.status,
            Some(BackendFailure::AccountExists),
        ))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<Outcome<LoginToken>, RelayError> {
        if response.status == 200 {
            let reply: LoginReply = decode(&response.body)?;
            return Ok(Outcome::Success(LoginToken {
                token: reply.access_token,
            }));
        }
        Ok(Outcome::Failure(BackendFailure::from_status(
            response.status,
            Some(BackendFailure::LoginRejected),
        )))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Outcome<Value>, RelayError> {
        if response.status == 200 {
            return decode(&response.body).map(Outcome::Success);
        }
        Ok(Outcome::Failure(BackendFailure::from_status(
            response.status,
            Some(BackendFailure::InvalidToken),
        )))
    }

    /// 401 has no dedicated meaning for project creation.
    pub fn parse_create_project(&self, response: HttpResponse) -> Outcome<Confirmation> {
        if response.status == 200 {
            return Outcome::Success(Confirmation::Success);
        }
        Outcome::Failure(BackendFailure::from_status(response.status, None))
    }

    /// A 2xx other than 200 is read as "no such project".
    pub fn parse_get_project(
        &self,
        response: HttpResponse,
    ) -> Result<Outcome<ProjectLookup>, RelayError> {
        match response.status {
            200 => decode(&response.body)
                .map(|project| Outcome::Success(ProjectLookup::Found(project))),
            201..=299 => Ok(Outcome::Success(ProjectLookup::Missing)),
            status => Ok(Outcome::Failure(BackendFailure::from_status(
                status,
                Some(BackendFailure::InvalidToken),
            ))),
        }
    }

    pub fn parse_delete_project(&self, response: HttpResponse) -> Outcome<Confirmation> {
        if response.status == 200 {
            return Outcome::Success(Confirmation::ProjectDeleted);
        }
        Outcome::Failure(BackendFailure::from_status(
            response.status,
            Some(BackendFailure::InvalidToken),
        ))
    }

    fn json_post<T: Serialize>(
        &self,
        endpoint: &str,
        input: &T,
    ) -> Result<HttpRequest, RelayError> {
        let body =
            serde_json::to_string(input).map_err(|e| RelayError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{endpoint}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn with_token(&self, endpoint: &str, access_token: &str) -> String {
        let token: String = form_urlencoded::byte_serialize(access_token.as_bytes()).collect();
        format!("{}{endpoint}?accessToken={token}", self.base_url)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RelayError> {
    serde_json::from_slice(body).map_err(|e| RelayError::Deserialization(e.to_string()))
}
