//! Client configuration.
//!
//! Loaded from a TOML file whose every field is optional, then overridden by
//! `HOSTEL_API_URL` and `HOSTEL_SESSION_FILE` from the environment.
//!
//! ```toml
//! base_url = "https://api.example.com/api/v1"
//! session_file = "~/.hostel/session.json"
//! room_filter = "server"
//!
//! [paths]
//! reservations = "/reservations"
//! ```

use crate::framework::FilterStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const ENV_API_URL: &str = "HOSTEL_API_URL";
pub const ENV_SESSION_FILE: &str = "HOSTEL_SESSION_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Where the session is persisted. In memory only when unset.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
    #[serde(default)]
    pub paths: ApiPaths,
    #[serde(default = "default_local")]
    pub hotel_filter: FilterStrategy,
    #[serde(default = "default_local")]
    pub room_filter: FilterStrategy,
    #[serde(default)]
    pub reservation_filter: FilterStrategy,
}

/// Resource paths, relative to `base_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPaths {
    #[serde(default = "default_hotels_path")]
    pub hotels: String,
    #[serde(default = "default_rooms_path")]
    pub rooms: String,
    #[serde(default = "default_reservations_path")]
    pub reservations: String,
    #[serde(default = "default_subscriptions_path")]
    pub subscriptions: String,
    #[serde(default = "default_users_path")]
    pub users: String,
    #[serde(default = "default_sign_in_path")]
    pub sign_in: String,
    #[serde(default = "default_sign_up_path")]
    pub sign_up: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            hotels: default_hotels_path(),
            rooms: default_rooms_path(),
            reservations: default_reservations_path(),
            subscriptions: default_subscriptions_path(),
            users: default_users_path(),
            sign_in: default_sign_in_path(),
            sign_up: default_sign_up_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_local() -> FilterStrategy {
    FilterStrategy::Local
}

fn default_hotels_path() -> String {
    "/hotels".to_string()
}

fn default_rooms_path() -> String {
    "/rooms".to_string()
}

fn default_reservations_path() -> String {
    "/bookings".to_string()
}

fn default_subscriptions_path() -> String {
    "/suscriptions".to_string()
}

fn default_users_path() -> String {
    "/users".to_string()
}

fn default_sign_in_path() -> String {
    "/authentication/sign-in".to_string()
}

fn default_sign_up_path() -> String {
    "/authentication/sign-up".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_file: None,
            paths: ApiPaths::default(),
            hotel_filter: FilterStrategy::Local,
            room_filter: FilterStrategy::Local,
            reservation_filter: FilterStrategy::Server,
        }
    }
}

impl ClientConfig {
    /// Reads `path` (defaults when it does not exist), then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config file found, using defaults");
            return Ok(Self::default());
        }
        info!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(file) = lookup(ENV_SESSION_FILE).filter(|v| !v.is_empty()) {
            self.session_file = Some(PathBuf::from(file));
        }
    }
}
