//! HTTP transport types exchanged between the client and a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `BackendClient` builds
//! `HttpRequest` values and classifies `HttpResponse` values without touching
//! the network; a `Transport` performs the round-trip in between. Tests swap
//! in a scripted transport and never open a socket.

/// HTTP method for an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An outbound request described as plain data.
///
/// `path` holds the absolute URL, query string included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A backend response described as plain data.
///
/// Non-2xx statuses are ordinary values here; classification happens in
/// `BackendClient::parse_*`. The body is kept as raw bytes and only decoded
/// by the operations that read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
