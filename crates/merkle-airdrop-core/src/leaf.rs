use alloy_primitives::{Address, U256};
use rs_merkle::Hasher as _;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AirdropError, AirdropResult};
use crate::hasher::{AirdropHasher, Hash};

/// One parsed input row: column name -> raw string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A recipient's award, canonicalized and hashed.
///
/// ## ⚠️ Leaf Preimage Layout
///
/// The preimage is the `abi.encodePacked(uint256 index, address account, uint256 amount,
/// string extra...)` layout and MUST NOT change once a root has been published:
///
/// ```text
/// offset  0: index    32 bytes, big-endian
/// offset 32: address  20 bytes, raw
/// offset 52: amount   32 bytes, big-endian
/// offset 84: extra    UTF-8 bytes of every extra value, in configured column order
/// ```
///
/// `index` is the record's position in the input. Binding it into the hash stops a proof
/// issued for one position from validating at another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub index: u64,
    pub hash: Hash,
    pub address: Address,
    pub amount: U256,
    /// (column, value) pairs carried through verbatim, in configured order.
    pub extra: Vec<(String, String)>,
}

impl Leaf {
    pub fn new(index: u64, address: Address, amount: U256, extra: Vec<(String, String)>) -> Self {
        let hash = hash_leaf(
            index,
            &address,
            &amount,
            extra.iter().map(|(_, value)| value.as_str()),
        );

        Self {
            index,
            hash,
            address,
            amount,
            extra,
        }
    }
}

/// Length of the fixed part of a leaf preimage (index + address + amount).
pub const FIXED_PREIMAGE_LEN: usize = 32 + 20 + 32;

pub fn encode_leaf_preimage<'a>(
    index: u64,
    address: &Address,
    amount: &U256,
    extra_values: impl IntoIterator<Item = &'a str>,
) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(FIXED_PREIMAGE_LEN);
    preimage.extend_from_slice(&U256::from(index).to_be_bytes::<32>());
    preimage.extend_from_slice(address.as_slice());
    preimage.extend_from_slice(&amount.to_be_bytes::<32>());
    for value in extra_values {
        preimage.extend_from_slice(value.as_bytes());
    }
    preimage
}

pub fn hash_leaf<'a>(
    index: u64,
    address: &Address,
    amount: &U256,
    extra_values: impl IntoIterator<Item = &'a str>,
) -> Hash {
    AirdropHasher::hash(&encode_leaf_preimage(index, address, amount, extra_values))
}

/// Parse a `0x`-prefixed, 40 hex digit account address. Checksum casing is not enforced.
pub fn parse_address(value: &str) -> Option<Address> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))?;
    if digits.len() != 40 {
        return None;
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).ok()?;
    Some(Address::from(bytes))
}

/// Parse a non-negative base-10 integer in the token's smallest unit.
///
/// No decimal scaling is applied: `"1"` is one base unit, not one whole token.
/// On failure the error is a short human-readable reason.
pub fn parse_amount(value: &str) -> Result<U256, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty value");
    }
    if value.starts_with('-') {
        return Err("negative amount");
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err("not a base-10 integer");
    }

    U256::from_str_radix(value, 10).map_err(|_| "does not fit in 256 bits")
}

/// Encode one record as the leaf at `index`.
pub fn encode_leaf(
    record: &Record,
    address_field: &str,
    amount_field: &str,
    extra_fields: &[String],
    index: usize,
) -> AirdropResult<Leaf> {
    let field = |name: &str| {
        record.get(name).ok_or_else(|| AirdropError::MissingField {
            record: index,
            field: name.to_string(),
        })
    };

    let raw_address = field(address_field)?;
    let address = parse_address(raw_address).ok_or_else(|| AirdropError::InvalidAddress {
        record: index,
        field: address_field.to_string(),
        value: raw_address.to_string(),
    })?;

    let raw_amount = field(amount_field)?;
    let amount = parse_amount(raw_amount).map_err(|reason| AirdropError::InvalidAmount {
        record: index,
        field: amount_field.to_string(),
        value: raw_amount.to_string(),
        reason: reason.to_string(),
    })?;

    let extra = extra_fields
        .iter()
        .map(|name| Ok::<_, AirdropError>((name.clone(), field(name)?.to_string())))
        .collect::<AirdropResult<Vec<_>>>()?;

    Ok(Leaf::new(index as u64, address, amount, extra))
}
