use crate::model::nullable;
use serde::{Deserialize, Serialize};

/// A bookable room inside a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    pub id: Option<i64>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub image: String,
    #[serde(rename = "type", deserialize_with = "nullable::or_default")]
    pub room_type: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub price: f64,
    pub hotel_id: Option<i64>,
    #[serde(deserialize_with = "nullable::or_true")]
    pub is_available: bool,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            id: None,
            image: String::new(),
            room_type: String::new(),
            price: 0.0,
            hotel_id: None,
            is_available: true,
        }
    }
}

/// Payload for creating or replacing a room.
///
/// `hotel_id` is required: after a write the store reloads the rooms of this hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    pub image: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price: f64,
    pub hotel_id: i64,
    pub is_available: bool,
}

impl Default for RoomDraft {
    fn default() -> Self {
        Self {
            image: String::new(),
            room_type: String::new(),
            price: 0.0,
            hotel_id: 0,
            is_available: true,
        }
    }
}
