//! Generic REST data layer.
//!
//! This module provides the building blocks every per-kind store is made of:
//! a shared HTTP client, a generic endpoint, the record assembler and the
//! observable store itself.
//!
//! # Main Components
//!
//! - [`HttpClient`] - Shared client that attaches the bearer token to every request
//! - [`ResourceEndpoint`] - CRUD verbs on one base path
//! - [`Resource`] - Trait that records implement to be decoded and stored
//! - [`ResourceStore`] - Observable items/current/loading/errors for one record kind
//! - [`SessionPersistence`] - Where the token and signed-in user are kept
//! - [`ApiError`] - Common error type
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test stores without a server.

pub mod endpoint;
pub mod error;
pub mod http;
pub mod mock;
pub mod resource;
pub mod session;
pub mod store;
pub mod transport;

pub use endpoint::ResourceEndpoint;
pub use error::{ApiError, SessionError};
pub use http::{ApiRequest, HttpClient, HttpTransport, Method, RawResponse};
pub use resource::{locate_collection, Resource};
pub use session::{FileSession, MemorySession, SessionPersistence, TOKEN_KEY, USER_KEY};
pub use store::{EntityStore, FilterStrategy, Refresh, ResourceStore, StoreState};
pub use transport::ReqwestTransport;
