use crate::model::nullable;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};

/// Lifecycle of a reservation.
///
/// Wire form is the lowercase hyphenated name. Capitalised spellings are
/// accepted on input; any other string is kept as [`ReservationStatus::Unknown`]
/// so one odd record does not fail the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    #[default]
    Pending,
    CheckedIn,
    CheckedOut,
    Cancelled,
    Unknown(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::CheckedIn => "checked-in",
            ReservationStatus::CheckedOut => "checked-out",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Unknown(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" => ReservationStatus::Pending,
            "checked-in" => ReservationStatus::CheckedIn,
            "checked-out" => ReservationStatus::CheckedOut,
            "cancelled" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Unknown(raw.to_string()),
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReservationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReservationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A guest's stay in one room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reservation {
    pub id: Option<i64>,
    pub room_id: Option<i64>,
    pub user_id: Option<i64>,
    pub hotel_id: Option<i64>,
    #[serde(deserialize_with = "nullable::or_default")]
    pub check_in_date: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub check_out_date: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub status: ReservationStatus,
    #[serde(deserialize_with = "nullable::or_default")]
    pub total_price: f64,
    #[serde(deserialize_with = "nullable::or_default")]
    pub guest_name: String,
    #[serde(deserialize_with = "nullable::or_default")]
    pub guest_email: String,
}

/// Payload for creating or replacing a reservation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub room_id: i64,
    pub user_id: i64,
    pub hotel_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: ReservationStatus,
    pub total_price: f64,
    pub guest_name: String,
    pub guest_email: String,
}
