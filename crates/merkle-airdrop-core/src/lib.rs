//! Deterministic merkle airdrop builder.
//!
//! Turns an ordered list of recipient records into a keccak256 merkle root plus one
//! inclusion proof per recipient, in the sorted-pair form an OpenZeppelin-style
//! `MerkleProof.verify` accepts on-chain.
//!
//! ```text
//! records -> encode_leaf -> AirdropTree -> generate_proof -> AirdropArtifact
//!                                                     awards -> pack / BatchClaim
//! ```

pub mod artifact;
pub mod assembler;
pub mod batch;
pub mod encoding;
pub mod error;
pub mod hasher;
pub mod leaf;
pub mod proof;
pub mod tree;

pub use artifact::{AirdropArtifact, Award, SingleClaim, RESERVED_AWARD_KEYS};
pub use assembler::{assemble, AssembleConfig, DuplicateAddressPolicy};
pub use batch::{pack, unpack_proofs, BatchClaim, PackedBatch};
pub use encoding::{address_to_hex, bytes_from_hex, hash_from_hex, to_hex};
pub use error::{AirdropError, AirdropResult};
pub use hasher::{hash_pair, AirdropHasher, Hash};
pub use leaf::{encode_leaf, encode_leaf_preimage, hash_leaf, parse_address, parse_amount, Leaf, Record};
pub use proof::{compute_root, generate_proof, verify_proof, Proof};
pub use tree::{build_levels, AirdropTree};

// Re-export the primitive types that appear in the public API
pub use alloy_primitives::{Address, U256};
