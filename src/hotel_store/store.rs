use crate::framework::{EntityStore, Refresh, ResourceStore};
use crate::model::{Hotel, HotelDraft};
use std::fmt::Display;
use tracing::{debug, instrument};

/// Store for hotels. Every write reloads the full list.
#[derive(Clone)]
pub struct HotelStore {
    inner: ResourceStore<Hotel>,
}

impl EntityStore<Hotel> for HotelStore {
    fn inner(&self) -> &ResourceStore<Hotel> {
        &self.inner
    }
}

impl HotelStore {
    pub fn new(inner: ResourceStore<Hotel>) -> Self {
        Self { inner }
    }

    pub fn hotels(&self) -> Vec<Hotel> {
        self.inner.items()
    }

    pub fn current_hotel(&self) -> Option<Hotel> {
        self.inner.current()
    }

    pub async fn fetch_hotels(&self) {
        self.inner.fetch_all().await
    }

    /// Hotels owned by one manager.
    pub async fn fetch_hotels_by_user_id(&self, user_id: impl Display) {
        self.inner.fetch_by_filter("userId", user_id).await
    }

    pub async fn fetch_hotel_by_id(&self, id: i64) {
        self.inner.fetch_by_id(&id).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_hotel(&self, draft: &HotelDraft) -> bool {
        debug!("Sending request");
        self.inner.create(draft, Refresh::All).await
    }

    pub async fn update_hotel(&self, id: i64, draft: &HotelDraft) -> bool {
        self.inner.update(&id, draft, Refresh::All).await
    }

    pub async fn delete_hotel(&self, id: i64) -> bool {
        self.inner.delete(&id, Refresh::All).await
    }
}
