use alloy_primitives::{Address, U256};
use serde::Serialize;

use crate::artifact::Award;
use crate::encoding::{address_to_hex, serialize_address, serialize_amounts, serialize_bytes};
use crate::error::{AirdropError, AirdropResult};
use crate::hasher::Hash;
use crate::proof::Proof;

/// Stride of one hash inside the packed proof blob.
pub const HASH_LEN: usize = 32;

/// Several awards' claim arguments flattened for the batch-claim entry point.
///
/// `ids`, `amounts` and `proof_lengths` are parallel, in the order the awards were given.
/// `packed_proofs` is every proof hash back to back (award order, then proof order) and
/// its length is always `sum(proof_lengths) * 32`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedBatch {
    pub ids: Vec<u64>,
    #[serde(serialize_with = "serialize_amounts")]
    pub amounts: Vec<U256>,
    #[serde(serialize_with = "serialize_bytes")]
    pub packed_proofs: Vec<u8>,
    pub proof_lengths: Vec<u64>,
}

impl PackedBatch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Slice `packed_proofs` back into one proof per award.
    pub fn unpack(&self) -> AirdropResult<Vec<Proof>> {
        unpack_proofs(&self.packed_proofs, &self.proof_lengths)
    }
}

/// Pack the claim arguments of `awards`, keeping the caller's order.
pub fn pack(awards: &[Award]) -> AirdropResult<PackedBatch> {
    if awards.is_empty() {
        return Err(AirdropError::EmptyBatch);
    }

    let total_hashes: usize = awards.iter().map(|award| award.proof.len()).sum();
    let mut packed_proofs = Vec::with_capacity(total_hashes * HASH_LEN);
    let mut ids = Vec::with_capacity(awards.len());
    let mut amounts = Vec::with_capacity(awards.len());
    let mut proof_lengths = Vec::with_capacity(awards.len());

    for award in awards {
        ids.push(award.id);
        amounts.push(award.amount);
        proof_lengths.push(award.proof.len() as u64);
        for hash in &award.proof {
            packed_proofs.extend_from_slice(hash);
        }
    }

    Ok(PackedBatch {
        ids,
        amounts,
        packed_proofs,
        proof_lengths,
    })
}

/// Inverse of the proof half of [`pack`]: cut `packed` into proofs using only `proof_lengths`.
pub fn unpack_proofs(packed: &[u8], proof_lengths: &[u64]) -> AirdropResult<Vec<Proof>> {
    let total_hashes = proof_lengths
        .iter()
        .try_fold(0u64, |total, len| total.checked_add(*len))
        .ok_or_else(|| AirdropError::MalformedBatch("proof lengths overflow".to_string()))?;

    if packed.len() % HASH_LEN != 0 || (packed.len() / HASH_LEN) as u64 != total_hashes {
        return Err(AirdropError::MalformedBatch(format!(
            "{} packed bytes do not hold the {} hashes the lengths declare",
            packed.len(),
            total_hashes
        )));
    }

    let mut hashes = packed.chunks_exact(HASH_LEN).map(|chunk| {
        let mut hash: Hash = [0u8; HASH_LEN];
        hash.copy_from_slice(chunk);
        hash
    });

    Ok(proof_lengths
        .iter()
        .map(|len| hashes.by_ref().take(*len as usize).collect())
        .collect())
}

/// Call data for the batch-claim entry point:
/// `(ids[], recipient, amounts[], packedProofBytes, proofLengths[])`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchClaim {
    #[serde(serialize_with = "serialize_address")]
    pub recipient: Address,
    #[serde(flatten)]
    pub batch: PackedBatch,
}

impl BatchClaim {
    /// Build a batch claim for `recipient`. Every award must belong to that recipient,
    /// since the ledger pays all of them to the single address passed in.
    pub fn for_recipient(recipient: Address, awards: &[Award]) -> AirdropResult<Self> {
        if let Some(foreign) = awards.iter().find(|award| award.address != recipient) {
            return Err(AirdropError::RecipientMismatch {
                id: foreign.id,
                owner: address_to_hex(&foreign.address),
                recipient: address_to_hex(&recipient),
            });
        }

        Ok(Self {
            recipient,
            batch: pack(awards)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award(id: u64, address: Address, proof_len: usize) -> Award {
        Award {
            id,
            address,
            amount: U256::from(id * 10 + 1),
            extra: vec![],
            proof: (0..proof_len)
                .map(|i| [(id as u8) * 16 + i as u8; 32])
                .collect(),
        }
    }

    #[test]
    fn test_pack_layout() {
        let recipient = Address::repeat_byte(0x11);
        let awards = vec![award(4, recipient, 2), award(1, recipient, 0), award(7, recipient, 3)];

        let batch = pack(&awards).unwrap();
        assert_eq!(batch.ids, vec![4, 1, 7]);
        assert_eq!(
            batch.amounts,
            vec![U256::from(41u64), U256::from(11u64), U256::from(71u64)]
        );
        assert_eq!(batch.proof_lengths, vec![2, 0, 3]);
        assert_eq!(batch.packed_proofs.len(), 5 * HASH_LEN);
        assert_eq!(&batch.packed_proofs[..HASH_LEN], &awards[0].proof[0]);
        assert_eq!(&batch.packed_proofs[2 * HASH_LEN..3 * HASH_LEN], &awards[2].proof[0]);
    }

    #[test]
    fn test_pack_then_unpack() {
        let recipient = Address::repeat_byte(0x22);
        let awards = vec![award(0, recipient, 3), award(2, recipient, 1), award(3, recipient, 0)];

        let proofs = pack(&awards).unwrap().unpack().unwrap();
        let originals: Vec<Proof> = awards.iter().map(|a| a.proof.clone()).collect();
        assert_eq!(proofs, originals);
    }

    #[test]
    fn test_empty_batch() {
        assert!(matches!(pack(&[]), Err(AirdropError::EmptyBatch)));
    }

    #[test]
    fn test_unpack_rejects_inconsistent_lengths() {
        let packed = vec![0u8; 2 * HASH_LEN];
        assert!(matches!(
            unpack_proofs(&packed, &[1, 2]),
            Err(AirdropError::MalformedBatch(_))
        ));
        assert!(matches!(
            unpack_proofs(&packed[..HASH_LEN + 1], &[1]),
            Err(AirdropError::MalformedBatch(_))
        ));
        assert!(matches!(
            unpack_proofs(&packed, &[u64::MAX, 2]),
            Err(AirdropError::MalformedBatch(_))
        ));
        assert_eq!(unpack_proofs(&packed, &[2, 0]).unwrap().len(), 2);
    }

    #[test]
    fn test_batch_claim_for_recipient() {
        let recipient = Address::repeat_byte(0x33);
        let awards = vec![award(0, recipient, 1), award(5, recipient, 2)];

        let claim = BatchClaim::for_recipient(recipient, &awards).unwrap();
        assert_eq!(claim.recipient, recipient);
        assert_eq!(claim.batch.len(), 2);

        let value = serde_json::to_value(&claim).unwrap();
        assert_eq!(value["recipient"], "0x3333333333333333333333333333333333333333");
        assert_eq!(value["ids"], serde_json::json!([0, 5]));
        assert_eq!(value["amounts"], serde_json::json!(["1", "51"]));
        assert_eq!(value["proof_lengths"], serde_json::json!([1, 2]));
        assert_eq!(
            value["packed_proofs"].as_str().unwrap().len(),
            2 + 3 * HASH_LEN * 2
        );
    }

    #[test]
    fn test_batch_claim_rejects_foreign_award() {
        let recipient = Address::repeat_byte(0x44);
        let awards = vec![award(0, recipient, 1), award(1, Address::repeat_byte(0x55), 1)];

        assert!(matches!(
            BatchClaim::for_recipient(recipient, &awards),
            Err(AirdropError::RecipientMismatch { id: 1, .. })
        ));
    }
}
