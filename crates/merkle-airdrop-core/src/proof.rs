use crate::error::{AirdropError, AirdropResult};
use crate::hasher::{hash_pair, Hash};

/// Sibling hashes from the leaf level up to, but excluding, the root.
pub type Proof = Vec<Hash>;

/// Generate the inclusion proof for the leaf at `leaf_index`.
///
/// A node that was paired contributes its sibling; a node that was carried up
/// contributes nothing and keeps its position (`index / 2`) on the next level.
pub fn generate_proof(levels: &[Vec<Hash>], leaf_index: usize) -> AirdropResult<Proof> {
    let leaf_count = levels.first().map_or(0, Vec::len);
    if leaf_index >= leaf_count {
        return Err(AirdropError::IndexOutOfRange {
            index: leaf_index,
            leaf_count,
        });
    }

    let mut proof = Vec::new();
    let mut current_index = leaf_index;

    // The last level is the root
    for level in &levels[..levels.len() - 1] {
        let sibling_index = current_index ^ 1;
        if let Some(sibling) = level.get(sibling_index) {
            proof.push(*sibling);
        }
        current_index /= 2;
    }

    Ok(proof)
}

/// Fold `proof` onto `leaf_hash`, sorting each pair before hashing.
pub fn compute_root(leaf_hash: &Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(*leaf_hash, |running, sibling| hash_pair(&running, sibling))
}

/// Mirror of the on-chain check: true iff `proof` takes `leaf_hash` to `root`.
pub fn verify_proof(leaf_hash: &Hash, proof: &[Hash], root: &Hash) -> bool {
    compute_root(leaf_hash, proof) == *root
}
