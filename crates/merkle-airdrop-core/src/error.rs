use thiserror::Error;

pub type AirdropResult<T> = Result<T, AirdropError>;

/// Errors raised while encoding, building, packing or checking an airdrop.
///
/// Every variant is a local validation failure. Nothing here is retryable.
#[derive(Error, Debug)]
pub enum AirdropError {
    #[error("Record {record}: invalid address in column '{field}': '{value}'")]
    InvalidAddress {
        record: usize,
        field: String,
        value: String,
    },

    #[error("Record {record}: invalid amount in column '{field}': '{value}' ({reason})")]
    InvalidAmount {
        record: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Record {record}: missing column '{field}'")]
    MissingField { record: usize, field: String },

    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyInput,

    #[error("Cannot pack an empty batch")]
    EmptyBatch,

    #[error("Leaf index {index} is out of range for a tree with {leaf_count} leaves")]
    IndexOutOfRange { index: usize, leaf_count: usize },

    #[error("Address {address} appears in record {first} and record {duplicate}")]
    DuplicateAddress {
        address: String,
        first: usize,
        duplicate: usize,
    },

    #[error("Malformed batch: {0}")]
    MalformedBatch(String),

    #[error("Award {id} belongs to {owner}, not {recipient}")]
    RecipientMismatch {
        id: u64,
        owner: String,
        recipient: String,
    },

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Proof for award {id} does not reproduce the root")]
    ProofMismatch { id: u64 },

    #[error("Awards rebuild root {computed}, artifact declares {expected}")]
    RootMismatch { expected: String, computed: String },

    #[error("Extra column '{0}' collides with a reserved award key")]
    ReservedExtraField(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
