use alloy_primitives::{Address, U256};
use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::encoding::{
    address_to_hex, deserialize_address, deserialize_amount, deserialize_hash,
    deserialize_hashes, hash_from_hex, serialize_address, serialize_amount, serialize_hash,
    serialize_hashes, to_hex,
};
use crate::error::{AirdropError, AirdropResult};
use crate::hasher::Hash;
use crate::leaf::{hash_leaf, parse_address, parse_amount, Leaf};
use crate::proof::{verify_proof, Proof};
use crate::tree::AirdropTree;

/// Keys every award object carries. Extra columns may not reuse them.
pub const RESERVED_AWARD_KEYS: &[&str] = &["id", "address", "amount", "proof"];

/// One recipient's entry in the published artifact.
///
/// Serialized as a flat JSON object: `id`, `address`, `amount`, then every extra column
/// in configured order, then `proof`. Deserializing keeps the extra columns in document
/// order so the leaf hash can be recomputed from a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award {
    pub id: u64,
    pub address: Address,
    pub amount: U256,
    pub extra: Vec<(String, String)>,
    pub proof: Proof,
}

impl Award {
    pub fn from_leaf(leaf: Leaf, proof: Proof) -> Self {
        Self {
            id: leaf.index,
            address: leaf.address,
            amount: leaf.amount,
            extra: leaf.extra,
            proof,
        }
    }

    pub fn leaf_hash(&self) -> Hash {
        hash_leaf(
            self.id,
            &self.address,
            &self.amount,
            self.extra.iter().map(|(_, value)| value.as_str()),
        )
    }

    pub fn verify(&self, root: &Hash) -> bool {
        verify_proof(&self.leaf_hash(), &self.proof, root)
    }

    pub fn extra_value(&self, field: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Arguments for the ledger's single-claim entry point.
    pub fn single_claim(&self) -> SingleClaim {
        SingleClaim {
            id: self.id,
            recipient: self.address,
            amount: self.amount,
            proof: self.proof.clone(),
        }
    }
}

impl Serialize for Award {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(4 + self.extra.len()))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("address", &address_to_hex(&self.address))?;
        map.serialize_entry("amount", &self.amount.to_string())?;
        for (field, value) in &self.extra {
            map.serialize_entry(field, value)?;
        }
        let proof: Vec<String> = self.proof.iter().map(to_hex).collect();
        map.serialize_entry("proof", &proof)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Award {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AwardVisitor)
    }
}

struct AwardVisitor;

impl<'de> Visitor<'de> for AwardVisitor {
    type Value = Award;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an award object with id, address, amount and proof")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Award, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut id = None;
        let mut address = None;
        let mut amount = None;
        let mut proof = None;
        let mut extra = Vec::new();

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "id" => id = Some(map.next_value::<u64>()?),
                "address" => {
                    let raw = map.next_value::<String>()?;
                    let parsed = parse_address(&raw).ok_or_else(|| {
                        A::Error::custom(format!("invalid address '{}'", raw))
                    })?;
                    address = Some(parsed);
                }
                "amount" => {
                    let raw = map.next_value::<String>()?;
                    let parsed = parse_amount(&raw).map_err(|reason| {
                        A::Error::custom(format!("invalid amount '{}': {}", raw, reason))
                    })?;
                    amount = Some(parsed);
                }
                "proof" => {
                    let raw = map.next_value::<Vec<String>>()?;
                    let parsed = raw
                        .iter()
                        .map(|h| hash_from_hex(h))
                        .collect::<AirdropResult<Proof>>()
                        .map_err(A::Error::custom)?;
                    proof = Some(parsed);
                }
                _ => {
                    let value = map.next_value::<String>()?;
                    extra.push((key, value));
                }
            }
        }

        Ok(Award {
            id: id.ok_or_else(|| A::Error::missing_field("id"))?,
            address: address.ok_or_else(|| A::Error::missing_field("address"))?,
            amount: amount.ok_or_else(|| A::Error::missing_field("amount"))?,
            extra,
            proof: proof.ok_or_else(|| A::Error::missing_field("proof"))?,
        })
    }
}

/// The builder's output: the root to publish on-chain plus every award with its proof.
///
/// The storage collaborator keeps this document verbatim, keyed by [`Self::fingerprint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdropArtifact {
    #[serde(serialize_with = "serialize_hash", deserialize_with = "deserialize_hash")]
    pub root: Hash,
    pub awards: Vec<Award>,
}

impl AirdropArtifact {
    pub fn to_json(&self) -> AirdropResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> AirdropResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> AirdropResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// SHA-256 of the compact JSON encoding. Identifies the document in storage.
    pub fn fingerprint(&self) -> AirdropResult<Hash> {
        let json = self.to_json()?;
        Ok(Sha256::digest(json.as_bytes()).into())
    }

    pub fn award(&self, id: u64) -> Option<&Award> {
        // Awards are written in id order, so the position is the fast path
        usize::try_from(id)
            .ok()
            .and_then(|position| self.awards.get(position))
            .filter(|award| award.id == id)
            .or_else(|| self.awards.iter().find(|award| award.id == id))
    }

    /// Every award for `address`. Duplicate addresses are legal, so there may be several.
    pub fn awards_for<'a>(&'a self, address: &'a Address) -> impl Iterator<Item = &'a Award> {
        self.awards
            .iter()
            .filter(move |award| award.address == *address)
    }

    pub fn total_amount(&self) -> U256 {
        self.awards
            .iter()
            .fold(U256::ZERO, |total, award| total.saturating_add(award.amount))
    }

    /// Check that every proof folds to the root and that the awards, in order, rebuild
    /// exactly this root (nothing missing, nothing reordered).
    pub fn verify(&self) -> AirdropResult<()> {
        for award in &self.awards {
            if !award.verify(&self.root) {
                return Err(AirdropError::ProofMismatch { id: award.id });
            }
        }

        let leaf_hashes = self.awards.iter().map(Award::leaf_hash).collect();
        let rebuilt = AirdropTree::from_leaf_hashes(leaf_hashes)?;
        if rebuilt.root() != self.root {
            return Err(AirdropError::RootMismatch {
                expected: to_hex(self.root),
                computed: to_hex(rebuilt.root()),
            });
        }

        Ok(())
    }
}

/// Call data for the single-claim entry point: `(id, recipient, amount, proof[])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleClaim {
    pub id: u64,
    #[serde(
        serialize_with = "serialize_address",
        deserialize_with = "deserialize_address"
    )]
    pub recipient: Address,
    #[serde(serialize_with = "serialize_amount", deserialize_with = "deserialize_amount")]
    pub amount: U256,
    #[serde(serialize_with = "serialize_hashes", deserialize_with = "deserialize_hashes")]
    pub proof: Proof,
}
