//! Subscription-specific resource logic and store.

pub mod entity;
pub mod store;

pub use store::SubscriptionStore;

use crate::framework::{FilterStrategy, HttpClient, ResourceEndpoint, ResourceStore};
use crate::lifecycle::config::ClientConfig;

/// Creates the subscription store on the configured path.
pub fn new(http: HttpClient, config: &ClientConfig) -> SubscriptionStore {
    let endpoint = ResourceEndpoint::new(http, config.paths.subscriptions.clone());
    SubscriptionStore::new(ResourceStore::new(endpoint, FilterStrategy::Server))
}
