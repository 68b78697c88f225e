//! Endpoints that do not fit the generic resource shape.

pub mod users_api;

pub use users_api::*;
