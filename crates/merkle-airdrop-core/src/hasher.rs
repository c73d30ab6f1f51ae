use rs_merkle::Hasher;
use sha3::{Digest, Keccak256};

/// A 32-byte keccak256 digest. Leaves, internal nodes and the root all use this type.
pub type Hash = [u8; 32];

/// Merkle hasher shared by the tree builder, the proof verifier and any
/// `rs_merkle` tree built over the same leaves.
///
/// ## Hashing Scheme
///
/// - **Leaf nodes**: `keccak256(preimage)` where the preimage is the packed leaf layout
///   produced by [`crate::leaf::encode_leaf_preimage`].
/// - **Internal nodes**: `keccak256(min(a, b) || max(a, b))`. The two children are ordered
///   bytewise before concatenation, so a proof never carries direction bits and the
///   on-chain verifier can sort-then-hash at every step.
/// - **Unpaired nodes**: carried up unchanged (`concat_and_hash(left, None) == left`).
///
/// This is the scheme used by OpenZeppelin's `MerkleProof.verify`, which keeps the
/// produced roots verifiable by a stock Solidity claim contract.
#[derive(Clone, Debug)]
pub struct AirdropHasher;

impl Hasher for AirdropHasher {
    type Hash = Hash;

    fn hash(data: &[u8]) -> Hash {
        Keccak256::digest(data).into()
    }

    fn concat_and_hash(left: &Hash, right: Option<&Hash>) -> Hash {
        match right {
            Some(right) => hash_pair(left, right),
            // No sibling: the node is promoted to the next level as-is
            None => *left,
        }
    }
}

/// Combine two sibling hashes. Argument order does not matter.
pub fn hash_pair(a: &Hash, b: &Hash) -> Hash {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };

    Keccak256::new()
        .chain_update(first)
        .chain_update(second)
        .finalize()
        .into()
}
