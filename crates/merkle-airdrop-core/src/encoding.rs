//! Hex and decimal string forms used by the artifact and the claim call data.
//!
//! Hashes and addresses are written as lowercase `0x`-prefixed hex. Amounts are
//! written as base-10 strings so values above 2^53 survive JSON consumers.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::{AirdropError, AirdropResult};
use crate::hasher::Hash;
use crate::leaf::{parse_address, parse_amount};

pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn address_to_hex(address: &Address) -> String {
    to_hex(address.as_slice())
}

/// Decode a 32-byte hash, with or without the `0x` prefix.
pub fn hash_from_hex(value: &str) -> AirdropResult<Hash> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let mut hash = [0u8; 32];
    hex::decode_to_slice(digits, &mut hash)
        .map_err(|e| AirdropError::InvalidHex(format!("'{}': {}", value, e)))?;
    Ok(hash)
}

/// Decode a byte blob, with or without the `0x` prefix.
pub fn bytes_from_hex(value: &str) -> AirdropResult<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits).map_err(|e| AirdropError::InvalidHex(format!("'{}': {}", value, e)))
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

pub(crate) fn serialize_hash<S>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex(hash))
}

pub(crate) fn deserialize_hash<'de, D>(deserializer: D) -> Result<Hash, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hash_from_hex(&s).map_err(serde::de::Error::custom)
}

pub(crate) fn serialize_hashes<S>(hashes: &[Hash], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(hashes.iter().map(to_hex))
}

pub(crate) fn deserialize_hashes<'de, D>(deserializer: D) -> Result<Vec<Hash>, D::Error>
where
    D: Deserializer<'de>,
{
    let strings = Vec::<String>::deserialize(deserializer)?;
    strings
        .iter()
        .map(|s| hash_from_hex(s).map_err(serde::de::Error::custom))
        .collect()
}

pub(crate) fn serialize_address<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&address_to_hex(address))
}

pub(crate) fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_address(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid address '{}'", s)))
}

pub(crate) fn serialize_amount<S>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

pub(crate) fn serialize_amounts<S>(amounts: &[U256], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(amounts.iter().map(U256::to_string))
}

pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_amount(&s)
        .map_err(|reason| serde::de::Error::custom(format!("invalid amount '{}': {}", s, reason)))
}

pub(crate) fn serialize_bytes<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&to_hex(bytes))
}
