//! Serde helpers for byte fields stored as bare lowercase hex strings.

use alloy_primitives::hex;
use serde::{Deserialize, Deserializer, Serializer, de};

pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&hex::encode(bytes))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let encoded = String::deserialize(deserializer)?;
    hex::decode(&encoded).map_err(|err| de::Error::custom(format!("invalid hex {encoded:?}: {err}")))
}
