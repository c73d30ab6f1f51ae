use crate::commands::{load_artifact, parse_recipient};
use crate::error::{CliError, CliResult};
use merkle_airdrop_core::{AirdropArtifact, SingleClaim};
use std::path::PathBuf;

pub fn execute(artifact: PathBuf, id: Option<u64>, address: Option<String>) -> CliResult<()> {
    let artifact = load_artifact(&artifact)?;
    let claims = single_claims(&artifact, id, address.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}

/// Single-claim call data for one award (`id`) or every award of one address.
pub(crate) fn single_claims(
    artifact: &AirdropArtifact,
    id: Option<u64>,
    address: Option<&str>,
) -> CliResult<Vec<SingleClaim>> {
    match (id, address) {
        (Some(id), None) => artifact
            .award(id)
            .map(|award| vec![award.single_claim()])
            .ok_or_else(|| CliError::NotFound(format!("award {}", id))),
        (None, Some(address)) => {
            let recipient = parse_recipient(address)?;
            let claims: Vec<_> = artifact
                .awards_for(&recipient)
                .map(|award| award.single_claim())
                .collect();
            if claims.is_empty() {
                return Err(CliError::NotFound(format!("awards for {}", address)));
            }
            Ok(claims)
        }
        _ => Err(CliError::InvalidArgument(
            "pass exactly one of --id or --address".to_string(),
        )),
    }
}
