pub mod domain;
pub mod error;
pub mod protocol;

use serde::{Deserialize, Deserializer};

/// Backends built on Jackson emit `null` for unset collections; treat that like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
