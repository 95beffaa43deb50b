//! The six relay operations, each one outbound call at most.
//!
//! # Design
//! `Backend` pairs the pure `BackendClient` with a `Transport`. It owns no
//! mutable state, so a single value can be shared across request handlers.
//! Operations that need an access token short-circuit with
//! `BackendFailure::MissingToken` before anything is sent.

use serde_json::Value;
use tracing::{info, warn};

use crate::client::BackendClient;
use crate::error::{BackendFailure, RelayError};
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    Confirmation, Credentials, LoginToken, NewProject, Outcome, ProjectLookup, Registration,
};

#[derive(Clone)]
pub struct Backend<T = UreqTransport> {
    client: BackendClient,
    transport: T,
}

impl Backend<UreqTransport> {
    /// Backend reached over real HTTP at `base_url`.
    pub fn connect(base_url: &str) -> Self {
        Self::new(BackendClient::new(base_url), UreqTransport::new())
    }
}

impl<T: Transport> Backend<T> {
    pub fn new(client: BackendClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn register(&self, input: &Registration) -> Result<Outcome<Confirmation>, RelayError> {
        let request = self.client.build_register(input)?;
        let response = self.transport.execute(request)?;
        let outcome = self.client.parse_register(response);
        log_outcome("register", &outcome);
        Ok(outcome)
    }

    pub fn login(&self, input: &Credentials) -> Result<Outcome<LoginToken>, RelayError> {
        let request = self.client.build_login(input)?;
        let response = self.transport.execute(request)?;
        let outcome = self.client.parse_login(response)?;
        log_outcome("login", &outcome);
        Ok(outcome)
    }

    pub fn list_users(&self, access_token: Option<&str>) -> Result<Outcome<Value>, RelayError> {
        let Some(access_token) = access_token else {
            return Ok(missing_token("list_users"));
        };
        let response = self.transport.execute(self.client.build_list_users(access_token))?;
        let outcome = self.client.parse_list_users(response)?;
        log_outcome("list_users", &outcome);
        Ok(outcome)
    }

    pub fn create_project(&self, input: &NewProject) -> Result<Outcome<Confirmation>, RelayError> {
        let request = self.client.build_create_project(input)?;
        let response = self.transport.execute(request)?;
        let outcome = self.client.parse_create_project(response);
        log_outcome("create_project", &outcome);
        Ok(outcome)
    }

    pub fn get_project(
        &self,
        project_id: u64,
        access_token: Option<&str>,
    ) -> Result<Outcome<ProjectLookup>, RelayError> {
        let Some(access_token) = access_token else {
            return Ok(missing_token("get_project"));
        };
        let request = self.client.build_get_project(project_id, access_token);
        let response = self.transport.execute(request)?;
        let outcome = self.client.parse_get_project(response)?;
        log_outcome("get_project", &outcome);
        Ok(outcome)
    }

    pub fn delete_project(
        &self,
        project_id: u64,
        access_token: Option<&str>,
    ) -> Result<Outcome<Confirmation>, RelayError> {
        let Some(access_token) = access_token else {
            return Ok(missing_token("delete_project"));
        };
        let request = self.client.build_delete_project(project_id, access_token);
        let response = self.transport.execute(request)?;
        let outcome = self.client.parse_delete_project(response);
        log_outcome("delete_project", &outcome);
        Ok(outcome)
    }
}

fn missing_token<R>(operation: &'static str) -> Outcome<R> {
    info!(operation, "no access token supplied, request not sent");
    Outcome::Failure(BackendFailure::MissingToken)
}

fn log_outcome<R>(operation: &'static str, outcome: &Outcome<R>) {
    match outcome.failure() {
        None => info!(operation, "backend call succeeded"),
        Some(failure) => warn!(operation, ?failure, "backend reported failure"),
    }
}
