//! # Mock Transport
//!
//! Utilities for testing stores without a network.
//!
//! [`MockTransport`] replays scripted responses in order and records every
//! request it sees. When a test needs to control *when* a response arrives
//! (in-flight state, overlapping actions), use [`create_mock_transport`] and
//! answer each [`PendingRequest`] by hand.

use crate::framework::error::ApiError;
use crate::framework::http::{ApiRequest, HttpTransport, Method, RawResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

struct Expectation {
    method: Method,
    path: String,
    reply: Result<RawResponse, ApiError>,
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    requests: Mutex<Vec<ApiRequest>>,
}

/// A scripted transport with expectation tracking.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new();
/// mock.expect(Method::Get, "/hotels").return_ok(json!([{ "id": 1 }]));
///
/// let http = HttpClient::new(mock.transport(), Arc::new(MemorySession::new()));
/// // Use http in tests...
/// mock.verify(); // Ensures every expectation was consumed
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transport for use in an [`HttpClient`](crate::framework::HttpClient).
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::new(self.clone())
    }

    /// Expects the next request to be `method path`. Query strings are not part of `path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            state: self.state.clone(),
        }
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.state.expectations.lock().unwrap();
        if !exps.is_empty() {
            let remaining: Vec<_> = exps.iter().map(|e| format!("{} {}", e.method, e.path)).collect();
            panic!("Not all expectations were met. Remaining: {:?}", remaining);
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.state.requests.lock().unwrap().push(request.clone());

        let expectation = self.state.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(exp) if exp.method == request.method && exp.path == request.path => exp.reply,
            Some(exp) => panic!(
                "Expected {} {}, got {} {}",
                exp.method, exp.path, request.method, request.path
            ),
            None => panic!("Unexpected request {} {}", request.method, request.path),
        }
    }
}

/// Builder for one scripted response.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    state: Arc<MockState>,
}

impl ExpectationBuilder {
    fn push(self, reply: Result<RawResponse, ApiError>) {
        self.state.expectations.lock().unwrap().push_back(Expectation {
            method: self.method,
            path: self.path,
            reply,
        });
    }

    /// Answers with `200` and `body`.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(RawResponse::ok(body)));
    }

    /// Answers with a non-2xx status.
    pub fn return_status(self, status: u16, body: impl Into<String>) {
        let body = body.into();
        self.push(Err(ApiError::Status { status, body }));
    }

    /// Fails with `error`.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// A request held by the test until it chooses to answer.
pub struct PendingRequest {
    pub request: ApiRequest,
    pub respond_to: oneshot::Sender<Result<RawResponse, ApiError>>,
}

impl PendingRequest {
    pub fn respond_ok(self, body: Value) {
        let _ = self.respond_to.send(Ok(RawResponse::ok(body)));
    }

    pub fn respond_err(self, error: ApiError) {
        let _ = self.respond_to.send(Err(error));
    }
}

struct ChannelTransport {
    sender: mpsc::Sender<PendingRequest>,
}

#[async_trait]
impl HttpTransport for ChannelTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PendingRequest { request, respond_to })
            .await
            .map_err(|_| ApiError::Transport("mock receiver dropped".into()))?;
        response
            .await
            .map_err(|_| ApiError::Transport("mock request dropped without answer".into()))?
    }
}

/// Creates a transport and a receiver for asserting requests.
///
/// Every request sent through the transport arrives on the receiver and
/// waits there until the test answers it.
pub fn create_mock_transport(
    buffer_size: usize,
) -> (Arc<dyn HttpTransport>, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (Arc::new(ChannelTransport { sender }), receiver)
}

/// Waits for the next request.
pub async fn expect_request(receiver: &mut mpsc::Receiver<PendingRequest>) -> Option<PendingRequest> {
    receiver.recv().await
}
