//! Resource trait implementation for the Reservation domain type.

use crate::framework::Resource;
use crate::model::{Reservation, ReservationDraft};

impl Resource for Reservation {
    type Id = i64;
    type Create = ReservationDraft;
    type Update = ReservationDraft;

    const COLLECTION: &'static str = "reservations";

    fn id(&self) -> Option<&i64> {
        self.id.as_ref()
    }

    fn foreign_key(&self, key: &str) -> Option<i64> {
        match key {
            "userId" => self.user_id,
            "hotelId" => self.hotel_id,
            "roomId" => self.room_id,
            _ => None,
        }
    }
}
