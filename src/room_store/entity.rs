//! Resource trait implementation for the Room domain type.

use crate::framework::Resource;
use crate::model::{Room, RoomDraft};

impl Resource for Room {
    type Id = i64;
    type Create = RoomDraft;
    type Update = RoomDraft;

    const COLLECTION: &'static str = "rooms";

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn foreign_key(&self, key: &str) -> Option<i64> {
        match key {
            "hotelId" => self.hotel_id,
            _ => None,
        }
    }
}
