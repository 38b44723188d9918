//! Lenient deserialization helpers
//!
//! Records written by older tooling may carry `null` where a collection or a
//! map entry is expected, or role names the model no longer knows. All of these
//! decode to an empty or filtered value instead of rejecting the whole record.

use crate::Role;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet};

/// Decode `null` as `T::default()`. Pair with `#[serde(default)]` for absent keys.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a role list, skipping names that are not a known [`Role`]
pub fn lenient_roles<'de, D>(deserializer: D) -> Result<BTreeSet<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut roles = BTreeSet::new();
    for name in names.unwrap_or_default() {
        match name.parse::<Role>() {
            Ok(role) => {
                roles.insert(role);
            }
            Err(_) => tracing::warn!(role = %name, "ignoring unknown role in grant list"),
        }
    }
    Ok(roles)
}

/// Decode a map, dropping entries whose value is `null`
///
/// A `null` map decodes as empty, like [`null_as_default`].
pub fn skip_null_values<'de, D, K, V>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Ord + Deserialize<'de>,
    V: Deserialize<'de>,
{
    let entries: Option<BTreeMap<K, Option<V>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}
