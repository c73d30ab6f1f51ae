use rs_merkle::Hasher as _;
use serde::Serialize;

use crate::error::{AirdropError, AirdropResult};
use crate::hasher::{AirdropHasher, Hash};
use crate::leaf::Leaf;
use crate::proof::{generate_proof, Proof};

/// Binary merkle tree stored level by level.
///
/// `levels[0]` holds the leaf hashes in index order and the last level holds only the
/// root. Parents are found by position (`i / 2`), so there are no node pointers and the
/// whole structure serializes as nested arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirdropTree {
    root: Hash,
    levels: Vec<Vec<Hash>>,
}

impl AirdropTree {
    pub fn from_leaves(leaves: &[Leaf]) -> AirdropResult<Self> {
        Self::from_leaf_hashes(leaves.iter().map(|leaf| leaf.hash).collect())
    }

    pub fn from_leaf_hashes(leaf_hashes: Vec<Hash>) -> AirdropResult<Self> {
        let (root, levels) = build_levels(leaf_hashes)?;
        Ok(Self { root, levels })
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    pub fn levels(&self) -> &[Vec<Hash>] {
        &self.levels
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of hashing levels above the leaves: `ceil(log2(leaf_count))`.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn proof(&self, leaf_index: usize) -> AirdropResult<Proof> {
        generate_proof(&self.levels, leaf_index)
    }
}

/// Build every level of the tree and return `(root, levels)`.
///
/// Adjacent nodes are paired left to right with the sorted-pair rule. When a level has
/// an odd number of nodes, the last one is carried up unchanged rather than duplicated.
pub fn build_levels(leaf_hashes: Vec<Hash>) -> AirdropResult<(Hash, Vec<Vec<Hash>>)> {
    if leaf_hashes.is_empty() {
        return Err(AirdropError::EmptyInput);
    }

    let mut current_level = leaf_hashes;
    let mut all_levels = Vec::new();

    while current_level.len() > 1 {
        let next_level: Vec<Hash> = current_level
            .chunks(2)
            .map(|pair| AirdropHasher::concat_and_hash(&pair[0], pair.get(1)))
            .collect();
        all_levels.push(std::mem::replace(&mut current_level, next_level));
    }

    let root = current_level[0];
    all_levels.push(current_level);

    Ok((root, all_levels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::hash_pair;
    use rs_merkle::{Hasher as _, MerkleTree};

    fn leaf_hashes(count: usize) -> Vec<Hash> {
        (0..count)
            .map(|i| AirdropHasher::hash(&(i as u64).to_be_bytes()))
            .collect()
    }

    #[test]
    fn test_build_tree_single_leaf() {
        let hashes = leaf_hashes(1);
        let tree = AirdropTree::from_leaf_hashes(hashes.clone()).unwrap();

        assert_eq!(tree.root(), hashes[0], "Single leaf tree root should be the leaf hash");
        assert_eq!(tree.levels().len(), 1, "Single leaf tree should have one level");
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_build_tree_two_leaves() {
        let hashes = leaf_hashes(2);
        let tree = AirdropTree::from_leaf_hashes(hashes.clone()).unwrap();

        assert_eq!(tree.root(), hash_pair(&hashes[0], &hashes[1]));
        assert_eq!(tree.levels(), &[hashes.clone(), vec![tree.root()]]);
    }

    #[test]
    fn test_odd_node_is_carried_up_not_duplicated() {
        let hashes = leaf_hashes(3);
        let tree = AirdropTree::from_leaf_hashes(hashes.clone()).unwrap();

        let left = hash_pair(&hashes[0], &hashes[1]);
        assert_eq!(tree.levels()[1], vec![left, hashes[2]]);
        assert_eq!(tree.root(), hash_pair(&left, &hashes[2]));
        assert_ne!(
            tree.root(),
            hash_pair(&left, &hash_pair(&hashes[2], &hashes[2])),
            "Last node must not be paired with itself"
        );
    }

    #[test]
    fn test_five_leaf_structure() {
        let h = leaf_hashes(5);
        let tree = AirdropTree::from_leaf_hashes(h.clone()).unwrap();

        let a = hash_pair(&h[0], &h[1]);
        let b = hash_pair(&h[2], &h[3]);
        let ab = hash_pair(&a, &b);

        assert_eq!(tree.levels()[1], vec![a, b, h[4]]);
        assert_eq!(tree.levels()[2], vec![ab, h[4]]);
        assert_eq!(tree.root(), hash_pair(&ab, &h[4]));
    }

    #[test]
    fn test_height_is_ceil_log2() {
        for count in 1..=70usize {
            let tree = AirdropTree::from_leaf_hashes(leaf_hashes(count)).unwrap();
            let expected = count.next_power_of_two().trailing_zeros() as usize;
            assert_eq!(tree.height(), expected, "Wrong height for {} leaves", count);
            assert_eq!(tree.levels().last().unwrap().len(), 1);
        }
    }

    #[test]
    fn test_matches_rs_merkle_reference() {
        for count in 1..=33usize {
            let hashes = leaf_hashes(count);
            let tree = AirdropTree::from_leaf_hashes(hashes.clone()).unwrap();
            let reference = MerkleTree::<AirdropHasher>::from_leaves(&hashes);

            assert_eq!(
                Some(tree.root()),
                reference.root(),
                "Root differs from rs_merkle for {} leaves",
                count
            );
        }
    }

    #[test]
    fn test_leaf_order_matters() {
        let hashes = leaf_hashes(4);
        let mut swapped = hashes.clone();
        swapped.swap(1, 2);

        let original = AirdropTree::from_leaf_hashes(hashes).unwrap();
        let reordered = AirdropTree::from_leaf_hashes(swapped).unwrap();
        assert_ne!(original.root(), reordered.root());
    }

    #[test]
    fn test_empty_input() {
        let result = AirdropTree::from_leaf_hashes(vec![]);
        assert!(matches!(result, Err(AirdropError::EmptyInput)));
    }
}
