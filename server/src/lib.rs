//! HTTP front door of the project relay.
//!
//! # Overview
//! Exposes register, login, list users and create/get/delete project as REST
//! endpoints. Every request is forwarded through a `relay_core::Backend` and
//! the resulting `Outcome` is returned unchanged.
//!
//! # Design
//! - One immutable `Backend` is shared by all handlers; nothing else is kept
//!   between requests.
//! - The backend client blocks, so each call runs on tokio's blocking pool.
//! - Failures that prevent relaying become a plain-text `API Error` response
//!   (see `ApiFailure`).

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use relay_core::{Backend, Transport};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiFailure;

pub fn app<T: Transport + 'static>(backend: Backend<T>) -> Router {
    routes::router(backend).layer(TraceLayer::new_for_http())
}

pub async fn run<T: Transport + 'static>(
    listener: TcpListener,
    backend: Backend<T>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(backend)).await
}
