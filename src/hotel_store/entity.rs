//! Resource trait implementation for the Hotel domain type.

use crate::framework::Resource;
use crate::model::{Hotel, HotelDraft};

impl Resource for Hotel {
    type Id = i64;
    type Create = HotelDraft;
    type Update = HotelDraft;

    const COLLECTION: &'static str = "hotels";

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn foreign_key(&self, key: &str) -> Option<i64> {
        match key {
            "userId" => self.user_id,
            _ => None,
        }
    }
}
