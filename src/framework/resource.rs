//! # Resource Trait & Assembler
//!
//! The `Resource` trait defines the contract every record (Hotel, Room,
//! Reservation, Subscription) implements to be served by the generic
//! [`ResourceEndpoint`](crate::framework::ResourceEndpoint) and
//! [`ResourceStore`](crate::framework::ResourceStore).
//!
//! The assembler half of the contract is provided: [`Resource::from_resource`]
//! builds one record from a raw payload and [`Resource::from_response`] finds
//! the record array inside a response body, whatever shape the backend chose
//! for that endpoint.

use crate::framework::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Debug, Display};
use tracing::warn;

/// Trait that any record must implement to be managed by a `ResourceStore`.
///
/// Associated types keep the write payloads apart: a `Hotel` store only
/// accepts a `HotelDraft`, never a `RoomDraft`.
pub trait Resource:
    Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Server-assigned identity.
    type Id: Clone + Debug + Display + PartialEq + Send + Sync;

    /// Body sent on `POST`.
    type Create: Serialize + Debug + Send + Sync;

    /// Body sent on `PUT`.
    type Update: Serialize + Debug + Send + Sync;

    /// Name of the nested array in wrapped responses, e.g. `"hotels"` in `{data: {hotels: [...]}}`.
    const COLLECTION: &'static str;

    /// `None` until the server has assigned one.
    fn id(&self) -> Option<&Self::Id>;

    /// Value of a numeric foreign key such as `"hotelId"`, used for local filtering.
    fn foreign_key(&self, _key: &str) -> Option<i64> {
        None
    }

    /// Builds one record from a raw payload.
    ///
    /// Missing fields take their declared defaults; a `null` or non-object
    /// payload yields the all-default record. A field present with the wrong
    /// JSON type is a decode error.
    fn from_resource(raw: &Value) -> Result<Self, ApiError> {
        match raw {
            Value::Object(_) => Ok(Self::deserialize(raw)?),
            _ => Ok(Self::default()),
        }
    }

    /// Builds every record found in a response body, in order.
    ///
    /// Elements that cannot be decoded are skipped and logged.
    fn from_response(body: &Value) -> Vec<Self> {
        locate_collection(body, Self::COLLECTION)
            .iter()
            .filter_map(|raw| match Self::from_resource(raw) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(collection = Self::COLLECTION, error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect()
    }
}

/// Resolves where the record array lives in a response body.
///
/// Checked in order: the body itself, `body.data`, `body.data.<collection>`,
/// `body.<collection>`. Anything else is an empty slice.
pub fn locate_collection<'a>(body: &'a Value, collection: &str) -> &'a [Value] {
    if let Some(items) = body.as_array() {
        return items;
    }
    if let Some(data) = body.get("data") {
        if let Some(items) = data.as_array() {
            return items;
        }
        if let Some(items) = data.get(collection).and_then(Value::as_array) {
            return items;
        }
    }
    if let Some(items) = body.get(collection).and_then(Value::as_array) {
        return items;
    }
    &[]
}
