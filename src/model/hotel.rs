use crate::model::nullable;
use serde::{Deserialize, Serialize};

/// A hotel owned by a manager account.
///
/// # Resource
/// This struct implements the [`Resource`](crate::framework::Resource) trait,
/// allowing it to be served by a [`ResourceStore`](crate::framework::ResourceStore).
///
/// See [`HotelStore`](crate::hotel_store::HotelStore) for the operations and
/// [`HotelDraft`] for the write payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub name: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub images: Vec<String>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub address: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub phone: String,
    /// Owning manager.
    pub user_id: Option<i64>,
}

/// Payload for creating or replacing a hotel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDraft {
    pub name: String,
    pub images: Vec<String>,
    pub address: String,
    pub phone: String,
    pub user_id: Option<i64>,
}

impl From<Hotel> for HotelDraft {
    fn from(hotel: Hotel) -> Self {
        Self {
            name: hotel.name,
            images: hotel.images,
            address: hotel.address,
            phone: hotel.phone,
            user_id: hotel.user_id,
        }
    }
}
