use crate::commands::{load_artifact, parse_recipient};
use crate::error::{CliError, CliResult};
use merkle_airdrop_core::{AirdropArtifact, Award, BatchClaim};
use std::path::PathBuf;
use tracing::info;

pub fn execute(artifact: PathBuf, recipient: String, ids: Vec<u64>) -> CliResult<()> {
    let artifact = load_artifact(&artifact)?;
    let claim = batch_claim(&artifact, &recipient, &ids)?;

    info!(
        "Packed {} awards, {} proof bytes",
        claim.batch.len(),
        claim.batch.packed_proofs.len()
    );
    println!("{}", serde_json::to_string_pretty(&claim)?);
    Ok(())
}

/// Batch-claim call data for `recipient`. With no `ids`, every award of the recipient
/// is included in artifact order.
pub(crate) fn batch_claim(
    artifact: &AirdropArtifact,
    recipient: &str,
    ids: &[u64],
) -> CliResult<BatchClaim> {
    let recipient = parse_recipient(recipient)?;

    let awards: Vec<Award> = if ids.is_empty() {
        artifact.awards_for(&recipient).cloned().collect()
    } else {
        ids.iter()
            .map(|id| {
                artifact
                    .award(*id)
                    .cloned()
                    .ok_or_else(|| CliError::NotFound(format!("award {}", id)))
            })
            .collect::<CliResult<_>>()?
    };

    Ok(BatchClaim::for_recipient(recipient, &awards)?)
}
