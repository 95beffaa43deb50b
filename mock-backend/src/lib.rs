//! In-memory stand-in for the remote project backend.
//!
//! Serves the same routes the relay forwards to, with the status codes the
//! real service uses: 401 for duplicate registrations, bad credentials and
//! unknown access tokens, 404 for missing projects. `BackendState::failing`
//! forces a fixed status on every route, and `hits` counts the requests
//! received so tests can assert that nothing was sent.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub use axum::http::StatusCode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub due_date: String,
}

#[derive(Deserialize)]
pub struct Register {
    pub email: String,
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

#[derive(Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateProject {
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub due_date: String,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    #[serde(rename = "accessToken")]
    pub access_token: Option<String>,
}

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
struct Store {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, u64>,
    projects: HashMap<u64, Project>,
    last_user_id: u64,
    last_project_id: u64,
}

impl Store {
    fn authorize(&self, query: &TokenQuery) -> Result<u64, StatusCode> {
        query
            .access_token
            .as_ref()
            .and_then(|token| self.tokens.get(token).copied())
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Shared state of one mock backend instance.
#[derive(Clone, Default)]
pub struct BackendState {
    store: Arc<RwLock<Store>>,
    hits: Arc<AtomicUsize>,
    fault: Option<StatusCode>,
}

impl BackendState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request is answered with `status` and an empty body.
    pub fn failing(status: StatusCode) -> Self {
        Self {
            fault: Some(status),
            ..Self::default()
        }
    }

    /// Number of requests received on the backend's routes so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn app() -> Router {
    router(BackendState::new())
}

pub fn router(state: BackendState) -> Router {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/user", get(list_users))
        .route("/api/project", post(create_project))
        .route("/api/project/{id}", get(get_project).delete(delete_project))
        .layer(middleware::from_fn_with_state(state.clone(), count_and_fault))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn count_and_fault(
    State(state): State<BackendState>,
    request: Request,
    next: Next,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    tracing::debug!(method = %request.method(), uri = %request.uri(), "mock backend hit");
    match state.fault {
        Some(status) => status.into_response(),
        None => next.run(request).await,
    }
}

async fn register(
    State(state): State<BackendState>,
    Json(input): Json<Register>,
) -> Result<Json<User>, StatusCode> {
    let mut store = state.store.write().await;
    if store.accounts.contains_key(&input.email) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    store.last_user_id += 1;
    let user = User {
        id: store.last_user_id,
        email: input.email.clone(),
        firstname: input.firstname,
        lastname: input.lastname,
    };
    store.accounts.insert(
        input.email,
        Account {
            user: user.clone(),
            password: input.password,
        },
    );
    Ok(Json(user))
}

async fn login(
    State(state): State<BackendState>,
    Json(input): Json<Login>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.store.write().await;
    let user_id = match store.accounts.get(&input.email) {
        Some(account) if account.password == input.password => account.user.id,
        _ => return Err(StatusCode::UNAUTHORIZED),
    };
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(token.clone(), user_id);
    Ok(Json(json!({ "accessToken": token, "userId": user_id })))
}

async fn list_users(
    State(state): State<BackendState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Vec<User>>, StatusCode> {
    let store = state.store.read().await;
    store.authorize(&query)?;
    let mut users: Vec<User> = store.accounts.values().map(|a| a.user.clone()).collect();
    users.sort_by_key(|u| u.id);
    Ok(Json(users))
}

async fn create_project(
    State(state): State<BackendState>,
    Json(input): Json<CreateProject>,
) -> Json<Project> {
    let mut store = state.store.write().await;
    store.last_project_id += 1;
    let project = Project {
        id: store.last_project_id,
        owner_id: input.owner_id,
        name: input.name,
        description: input.description,
        due_date: input.due_date,
    };
    store.projects.insert(project.id, project.clone());
    Json(project)
}

async fn get_project(
    State(state): State<BackendState>,
    Path(id): Path<u64>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Project>, StatusCode> {
    let store = state.store.read().await;
    store.authorize(&query)?;
    store.projects.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn delete_project(
    State(state): State<BackendState>,
    Path(id): Path<u64>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.store.write().await;
    store.authorize(&query)?;
    store
        .projects
        .remove(&id)
        .map(|_| Json(json!({ "deleted": id })))
        .ok_or(StatusCode::NOT_FOUND)
}
