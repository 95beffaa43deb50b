//! Backend client for the project relay.
//!
//! # Overview
//! Turns six logical operations (register, login, list users, create, get
//! and delete project) into one outbound HTTP call each, then classifies the
//! backend's status code into an `Outcome`: either the success value or a
//! `BackendFailure` rendered as `{"error_message": ...}`.
//!
//! # Design
//! - `BackendClient` is pure: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. It never touches the network.
//! - `Transport` performs the round-trip. `UreqTransport` is the blocking
//!   production implementation; tests substitute scripted transports.
//! - `Backend` pairs the two and is what callers use.
//! - Backend-reported statuses are values; only transport, body-read and
//!   decoding failures are `RelayError`.

pub mod backend;
pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use backend::Backend;
pub use client::{BackendClient, DEFAULT_BASE_URL};
pub use error::{BackendFailure, RelayError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport, DEFAULT_BODY_LIMIT};
pub use types::{
    Confirmation, Credentials, LoginToken, NewProject, Outcome, ProjectLookup, Registration,
    PROJECT_MISSING,
};
