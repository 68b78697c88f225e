use crate::framework::{EntityStore, Refresh, ResourceStore};
use crate::model::{Subscription, SubscriptionDraft};

/// Store for plan subscriptions. Every write reloads the full list.
#[derive(Clone)]
pub struct SubscriptionStore {
    inner: ResourceStore<Subscription>,
}

impl EntityStore<Subscription> for SubscriptionStore {
    fn inner(&self) -> &ResourceStore<Subscription> {
        &self.inner
    }
}

impl SubscriptionStore {
    pub fn new(inner: ResourceStore<Subscription>) -> Self {
        Self { inner }
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.inner.items()
    }

    pub fn current_subscription(&self) -> Option<Subscription> {
        self.inner.current()
    }

    pub async fn fetch_subscriptions(&self) {
        self.inner.fetch_all().await
    }

    pub async fn fetch_subscription_by_id(&self, id: i64) {
        self.inner.fetch_by_id(&id).await
    }

    pub async fn create_subscription(&self, draft: &SubscriptionDraft) -> bool {
        self.inner.create(draft, Refresh::All).await
    }

    pub async fn update_subscription(&self, id: i64, draft: &SubscriptionDraft) -> bool {
        self.inner.update(&id, draft, Refresh::All).await
    }

    pub async fn delete_subscription(&self, id: i64) -> bool {
        self.inner.delete(&id, Refresh::All).await
    }
}
