use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::artifact::{AirdropArtifact, Award, RESERVED_AWARD_KEYS};
use crate::encoding::{address_to_hex, to_hex};
use crate::error::{AirdropError, AirdropResult};
use crate::leaf::{encode_leaf, Leaf, Record};
use crate::tree::AirdropTree;

/// What to do when the same address appears in more than one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAddressPolicy {
    /// Every record becomes its own leaf at its own index. The recipient claims each one.
    #[default]
    Allow,
    /// Fail with [`AirdropError::DuplicateAddress`].
    Reject,
}

/// Which columns of a record feed the leaf, and how strict to be about the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleConfig {
    pub address_field: String,
    pub amount_field: String,
    /// Carried through into the leaf preimage and the award, in this order.
    #[serde(default)]
    pub extra_fields: Vec<String>,
    #[serde(default)]
    pub duplicate_addresses: DuplicateAddressPolicy,
}

impl AssembleConfig {
    pub fn new(address_field: impl Into<String>, amount_field: impl Into<String>) -> Self {
        Self {
            address_field: address_field.into(),
            amount_field: amount_field.into(),
            extra_fields: Vec::new(),
            duplicate_addresses: DuplicateAddressPolicy::default(),
        }
    }

    pub fn with_extra_fields<S: Into<String>>(
        mut self,
        extra_fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.extra_fields = extra_fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_duplicate_addresses(mut self, policy: DuplicateAddressPolicy) -> Self {
        self.duplicate_addresses = policy;
        self
    }

    fn check_extra_fields(&self) -> AirdropResult<()> {
        match self
            .extra_fields
            .iter()
            .find(|field| RESERVED_AWARD_KEYS.contains(&field.as_str()))
        {
            Some(field) => Err(AirdropError::ReservedExtraField(field.clone())),
            None => Ok(()),
        }
    }
}

/// Build the complete airdrop artifact from an ordered record set.
///
/// Each record becomes the leaf at its input position. The first record that fails to
/// encode aborts the whole call and no partial artifact is returned.
pub fn assemble<I>(records: I, config: &AssembleConfig) -> AirdropResult<AirdropArtifact>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    config.check_extra_fields()?;

    let leaves = encode_records(records, config)?;
    debug!("Encoded {} leaves", leaves.len());

    if config.duplicate_addresses == DuplicateAddressPolicy::Reject {
        check_unique_addresses(&leaves)?;
    }

    let tree = AirdropTree::from_leaves(&leaves)?;
    debug!(
        "Built tree with {} leaves and height {}",
        tree.leaf_count(),
        tree.height()
    );

    let awards = build_awards(leaves, &tree)?;

    info!(
        "Assembled airdrop with {} awards, root {}",
        awards.len(),
        to_hex(tree.root())
    );

    Ok(AirdropArtifact {
        root: tree.root(),
        awards,
    })
}

fn encode_records<I>(records: I, config: &AssembleConfig) -> AirdropResult<Vec<Leaf>>
where
    I: IntoIterator,
    I::Item: Borrow<Record>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            encode_leaf(
                record.borrow(),
                &config.address_field,
                &config.amount_field,
                &config.extra_fields,
                index,
            )
        })
        .collect()
}

fn check_unique_addresses(leaves: &[Leaf]) -> AirdropResult<()> {
    let mut seen: HashMap<Address, usize> = HashMap::with_capacity(leaves.len());
    for (position, leaf) in leaves.iter().enumerate() {
        if let Some(first) = seen.insert(leaf.address, position) {
            return Err(AirdropError::DuplicateAddress {
                address: address_to_hex(&leaf.address),
                first,
                duplicate: position,
            });
        }
    }
    Ok(())
}

#[cfg(not(feature = "rayon"))]
fn build_awards(leaves: Vec<Leaf>, tree: &AirdropTree) -> AirdropResult<Vec<Award>> {
    leaves
        .into_iter()
        .enumerate()
        .map(|(i, leaf)| Ok(Award::from_leaf(leaf, tree.proof(i)?)))
        .collect()
}

// Proof lookups only read the finished levels, so leaves can be processed in any order
#[cfg(feature = "rayon")]
fn build_awards(leaves: Vec<Leaf>, tree: &AirdropTree) -> AirdropResult<Vec<Award>> {
    leaves
        .into_par_iter()
        .enumerate()
        .map(|(i, leaf)| Ok(Award::from_leaf(leaf, tree.proof(i)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    fn record(address: &str, amount: &str) -> Record {
        [("wallet", address), ("tokens", amount)].into_iter().collect()
    }

    fn config() -> AssembleConfig {
        AssembleConfig::new("wallet", "tokens")
    }

    const ADDR_1: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA1";
    const ADDR_2: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA2";
    const ADDR_3: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA3";

    #[test]
    fn test_three_recipient_scenario() {
        let records = vec![
            record(ADDR_1, "100"),
            record(ADDR_2, "50"),
            record(ADDR_3, "25"),
        ];
        let artifact = assemble(&records, &config()).unwrap();

        assert_eq!(artifact.awards.len(), 3);
        let proof_lengths: Vec<usize> = artifact.awards.iter().map(|a| a.proof.len()).collect();
        // The third leaf is carried up past the first level
        assert_eq!(proof_lengths, vec![2, 2, 1]);

        for (i, award) in artifact.awards.iter().enumerate() {
            assert_eq!(award.id, i as u64);
            assert!(award.verify(&artifact.root), "Award {} should verify", i);
        }
        assert_eq!(artifact.awards[1].amount, U256::from(50u64));

        let mut bumped = records.clone();
        bumped[0] = record(ADDR_1, "101");
        let changed = assemble(&bumped, &config()).unwrap();
        assert_ne!(changed.root, artifact.root);
    }

    #[test]
    fn test_invalid_address_aborts() {
        let records = vec![record(ADDR_1, "100"), record("not-an-address", "5")];

        match assemble(&records, &config()) {
            Err(AirdropError::InvalidAddress { record, value, .. }) => {
                assert_eq!(record, 1);
                assert_eq!(value, "not-an-address");
            }
            other => panic!("Expected InvalidAddress, got {:?}", other),
        }
    }

    #[test]
    fn test_first_failing_record_is_reported() {
        let records = vec![
            record(ADDR_1, "100"),
            record(ADDR_2, "-3"),
            record("0x12", "4"),
        ];

        assert!(matches!(
            assemble(&records, &config()),
            Err(AirdropError::InvalidAmount { record: 1, .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Record> = Vec::new();
        assert!(matches!(
            assemble(&records, &config()),
            Err(AirdropError::EmptyInput)
        ));
    }

    #[test]
    fn test_duplicate_addresses_are_distinct_leaves_by_default() {
        let records = vec![record(ADDR_1, "10"), record(ADDR_2, "20"), record(ADDR_1, "10")];
        let artifact = assemble(&records, &config()).unwrap();

        let address = artifact.awards[0].address;
        let mine: Vec<u64> = artifact.awards_for(&address).map(|a| a.id).collect();
        assert_eq!(mine, vec![0, 2]);
        // Same address and amount, but the index keeps the leaves apart
        assert_ne!(artifact.awards[0].leaf_hash(), artifact.awards[2].leaf_hash());
        artifact.verify().unwrap();
    }

    #[test]
    fn test_duplicate_addresses_rejected_on_request() {
        let records = vec![record(ADDR_1, "10"), record(ADDR_2, "20"), record(ADDR_1, "30")];
        let strict = config().with_duplicate_addresses(DuplicateAddressPolicy::Reject);

        match assemble(&records, &strict) {
            Err(AirdropError::DuplicateAddress {
                address,
                first,
                duplicate,
            }) => {
                assert_eq!(address, ADDR_1.to_lowercase());
                assert_eq!((first, duplicate), (0, 2));
            }
            other => panic!("Expected DuplicateAddress, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_fields_flow_into_awards() {
        let records: Vec<Record> = vec![
            [("wallet", ADDR_1), ("tokens", "7"), ("handle", "alice"), ("tier", "gold")]
                .into_iter()
                .collect(),
            [("wallet", ADDR_2), ("tokens", "9"), ("handle", "bob"), ("tier", "silver")]
                .into_iter()
                .collect(),
        ];
        let cfg = config().with_extra_fields(["tier", "handle"]);
        let artifact = assemble(records, &cfg).unwrap();

        let award = &artifact.awards[1];
        assert_eq!(
            award.extra,
            vec![
                ("tier".to_string(), "silver".to_string()),
                ("handle".to_string(), "bob".to_string())
            ]
        );
        artifact.verify().unwrap();
    }

    #[test]
    fn test_reserved_extra_field_rejected() {
        let records = vec![record(ADDR_1, "1")];
        let cfg = config().with_extra_fields(["proof"]);

        assert!(matches!(
            assemble(&records, &cfg),
            Err(AirdropError::ReservedExtraField(field)) if field == "proof"
        ));
    }

    #[test]
    fn test_config_from_json() {
        let cfg: AssembleConfig = serde_json::from_str(
            r#"{"address_field":"wallet","amount_field":"tokens","duplicate_addresses":"reject"}"#,
        )
        .unwrap();

        assert_eq!(cfg.duplicate_addresses, DuplicateAddressPolicy::Reject);
        assert!(cfg.extra_fields.is_empty());
    }
}
