//! # HTTP Client Wrapper
//!
//! [`HttpTransport`] is the seam between the stores and the network: the
//! production implementation is [`ReqwestTransport`](crate::framework::ReqwestTransport),
//! tests plug in [`MockTransport`](crate::framework::mock::MockTransport).
//!
//! [`HttpClient`] wraps one transport and acts as the request interceptor: it
//! reads the bearer token from the injected session on every request.

use crate::framework::error::ApiError;
use crate::framework::session::SessionPersistence;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::{self, Display};
use std::sync::Arc;
use tracing::debug;

/// HTTP verbs used by the REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// A fully described outgoing request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A successful (2xx) response with its JSON body. Empty bodies are `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// Sends requests somewhere and returns their responses.
///
/// Implementations must report non-2xx answers as [`ApiError::Status`] and
/// network failures as [`ApiError::Transport`]. No retries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// The shared HTTP client, constructed once and handed to every endpoint.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<dyn SessionPersistence>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: Arc<dyn SessionPersistence>) -> Self {
        Self { transport, session }
    }

    /// The session this client reads its bearer token from.
    pub fn session(&self) -> &Arc<dyn SessionPersistence> {
        &self.session
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        self.request_with_query(method, path, &[], body).await
    }

    pub async fn request_with_query(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = ApiRequest::new(method, path);
        request.query = query.to_vec();
        request.body = body;

        // A missing token is not an error; the server decides.
        if let Some(token) = self.session.token() {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        debug!(%method, path, authorized = request.header("Authorization").is_some(), "Sending request");
        self.transport.send(request).await
    }
}
