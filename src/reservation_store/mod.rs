//! Reservation-specific resource logic, state transitions and store.

pub mod actions;
pub mod entity;
pub mod store;

pub use actions::ReservationAction;
pub use store::ReservationStore;

use crate::framework::{HttpClient, ResourceEndpoint, ResourceStore};
use crate::lifecycle::config::ClientConfig;

/// Creates the reservation store on the configured path (`/bookings` by default).
pub fn new(http: HttpClient, config: &ClientConfig) -> ReservationStore {
    let endpoint = ResourceEndpoint::new(http, config.paths.reservations.clone());
    ReservationStore::new(ResourceStore::new(endpoint, config.reservation_filter))
}
