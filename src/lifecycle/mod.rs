//! # System Lifecycle
//!
//! Configuration, logging setup and the [`HostelSystem`] that wires every
//! store to one shared HTTP client and session.

pub mod config;
pub mod hostel_system;
pub mod tracing;

pub use config::{ApiPaths, ClientConfig, ConfigError};
pub use hostel_system::{HostelSystem, SystemError};
pub use self::tracing::setup_tracing;
