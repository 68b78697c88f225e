//! Room-specific resource logic and store.

pub mod entity;
pub mod store;

pub use store::RoomStore;

use crate::framework::{HttpClient, ResourceEndpoint, ResourceStore};
use crate::lifecycle::config::ClientConfig;

/// Creates the room store on the configured path.
pub fn new(http: HttpClient, config: &ClientConfig) -> RoomStore {
    let endpoint = ResourceEndpoint::new(http, config.paths.rooms.clone());
    RoomStore::new(ResourceStore::new(endpoint, config.room_filter))
}
