//! The six relay endpoints.
//!
//! Each handler pulls its parameters from the body, query string or path,
//! runs exactly one `Backend` operation on the blocking pool and returns the
//! `Outcome` as JSON with status 200, whatever the backend said.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use relay_core::{
    Backend, Confirmation, Credentials, LoginToken, NewProject, Outcome, ProjectLookup,
    Registration, RelayError, Transport,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::ApiFailure;

type Shared<T> = Arc<Backend<T>>;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

pub fn router<T: Transport + 'static>(backend: Backend<T>) -> Router {
    Router::new()
        .route("/api/register", post(register::<T>))
        .route("/api/login", post(login::<T>))
        .route("/api/user", get(list_users::<T>))
        .route("/api/project", post(create_project::<T>))
        .route(
            "/api/project/{id}",
            get(get_project::<T>).delete(delete_project::<T>),
        )
        .with_state(Arc::new(backend))
}

/// Run one blocking backend operation off the async workers.
async fn relay<T, R, F>(backend: Shared<T>, operation: F) -> Result<Json<Outcome<R>>, ApiFailure>
where
    T: Transport + 'static,
    R: Send + 'static,
    F: FnOnce(&Backend<T>) -> Result<Outcome<R>, RelayError> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || operation(&backend)).await??;
    Ok(Json(outcome))
}

async fn register<T: Transport + 'static>(
    State(backend): State<Shared<T>>,
    body: Result<Json<Registration>, JsonRejection>,
) -> Result<Json<Outcome<Confirmation>>, ApiFailure> {
    let Json(input) = body?;
    info!(email = %input.email, "register");
    relay(backend, move |b| b.register(&input)).await
}

async fn login<T: Transport + 'static>(
    State(backend): State<Shared<T>>,
    body: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<Outcome<LoginToken>>, ApiFailure> {
    let Json(input) = body?;
    info!(email = %input.email, "login");
    relay(backend, move |b| b.login(&input)).await
}

async fn list_users<T: Transport + 'static>(
    State(backend): State<Shared<T>>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Outcome<Value>>, ApiFailure> {
    let Query(query) = query?;
    info!("list users");
    relay(backend, move |b| b.list_users(query.access_token.as_deref())).await
}

async fn create_project<T: Transport + 'static>(
    State(backend): State<Shared<T>>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<Json<Outcome<Confirmation>>, ApiFailure> {
    let Json(input) = body?;
    info!(owner_id = input.owner_id, name = %input.name, "create project");
    relay(backend, move |b| b.create_project(&input)).await
}

async fn get_project<T: Transport + 'static>(
    State(backend): State<Shared<T>>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Outcome<ProjectLookup>>, ApiFailure> {
    let Path(id) = id?;
    let Query(query) = query?;
    info!(project_id = id, "get project");
    relay(backend, move |b| b.get_project(id, query.access_token.as_deref())).await
}

async fn delete_project<T: Transport + 'static>(
    State(backend): State<Shared<T>>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Outcome<Confirmation>>, ApiFailure> {
    let Path(id) = id?;
    let Query(query) = query?;
    info!(project_id = id, "delete project");
    relay(backend, move |b| b.delete_project(id, query.access_token.as_deref())).await
}
