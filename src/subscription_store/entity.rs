//! Resource trait implementation for the Subscription domain type.

use crate::framework::Resource;
use crate::model::{Subscription, SubscriptionDraft};

impl Resource for Subscription {
    type Id = i64;
    type Create = SubscriptionDraft;
    type Update = SubscriptionDraft;

    // Matches the backend's resource name.
    const COLLECTION: &'static str = "suscriptions";

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }
}
