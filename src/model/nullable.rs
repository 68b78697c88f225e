//! Field decoders that read an explicit JSON `null` as the field's default.
//!
//! Missing fields already fall back through `#[serde(default)]`; these cover
//! fields that are present but `null`.

use serde::{Deserialize, Deserializer};

pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn or_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}
