use crate::auth_store::AuthStore;
use crate::framework::{
    FileSession, HttpClient, HttpTransport, MemorySession, ReqwestTransport, SessionError,
    SessionPersistence,
};
use crate::hotel_store::HotelStore;
use crate::lifecycle::config::{ClientConfig, ConfigError};
use crate::reservation_store::ReservationStore;
use crate::room_store::RoomStore;
use crate::subscription_store::SubscriptionStore;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to open session storage: {0}")]
    Session(#[from] SessionError),
}

/// Every store of the application, wired to one shared [`HttpClient`].
///
/// `HostelSystem` is responsible for:
/// - **Dependency Wiring**: one transport and one session for all stores, so
///   the token stored by [`AuthStore::login`] authorises every later request
/// - **Configuration**: resource paths and filter strategies from [`ClientConfig`]
///
/// # Example
///
/// ```ignore
/// let system = HostelSystem::load(Path::new("hostel.toml"))?;
///
/// system.auth.login(&Credentials::new("ana", "secret")).await;
/// system.hotels.fetch_hotels().await;
/// println!("{} hotels", system.hotels.hotels().len());
/// ```
#[derive(Clone)]
pub struct HostelSystem {
    pub hotels: HotelStore,
    pub rooms: RoomStore,
    pub reservations: ReservationStore,
    pub subscriptions: SubscriptionStore,
    pub auth: AuthStore,
    http: HttpClient,
}

impl HostelSystem {
    /// Builds every store on `transport` and `session`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: Arc<dyn SessionPersistence>,
        config: &ClientConfig,
    ) -> Self {
        let http = HttpClient::new(transport, session);
        Self {
            hotels: crate::hotel_store::new(http.clone(), config),
            rooms: crate::room_store::new(http.clone(), config),
            reservations: crate::reservation_store::new(http.clone(), config),
            subscriptions: crate::subscription_store::new(http.clone(), config),
            auth: AuthStore::new(http.clone(), &config.paths),
            http,
        }
    }

    /// Builds the production system: HTTP via `reqwest`, session on disk when
    /// `session_file` is set, in memory otherwise.
    pub fn from_config(config: &ClientConfig) -> Result<Self, SystemError> {
        let session: Arc<dyn SessionPersistence> = match &config.session_file {
            Some(path) => Arc::new(FileSession::open(path)?),
            None => Arc::new(MemorySession::new()),
        };
        info!(base_url = %config.base_url, persistent = config.session_file.is_some(), "Starting client");
        let transport = Arc::new(ReqwestTransport::new(config.base_url.clone()));
        Ok(Self::new(transport, session, config))
    }

    /// [`ClientConfig::load`] followed by [`HostelSystem::from_config`].
    pub fn load(path: &Path) -> Result<Self, SystemError> {
        let config = ClientConfig::load(path)?;
        Self::from_config(&config)
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}
