//! Hotel-specific resource logic and store.

pub mod entity;
pub mod store;

pub use store::HotelStore;

use crate::framework::{HttpClient, ResourceEndpoint, ResourceStore};
use crate::lifecycle::config::ClientConfig;

/// Creates the hotel store on the configured path.
pub fn new(http: HttpClient, config: &ClientConfig) -> HotelStore {
    let endpoint = ResourceEndpoint::new(http, config.paths.hotels.clone());
    HotelStore::new(ResourceStore::new(endpoint, config.hotel_filter))
}
