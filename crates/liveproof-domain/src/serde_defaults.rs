//! Lenient field decoding shared by the wire types.

use serde::{Deserialize, Deserializer};

/// Decode a field that may be missing or `null` into its default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
