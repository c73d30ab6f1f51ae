use crate::commands::load_artifact;
use crate::error::CliResult;
use merkle_airdrop_core::to_hex;
use std::path::PathBuf;
use tracing::info;

pub fn execute(artifact_path: PathBuf) -> CliResult<()> {
    let artifact = load_artifact(&artifact_path)?;

    info!("Checking {} awards against the root", artifact.awards.len());
    artifact.verify()?;

    println!("Artifact OK: {}", artifact_path.display());
    println!("Root: {}", to_hex(artifact.root));
    println!("Awards: {}", artifact.awards.len());
    println!("Total amount: {}", artifact.total_amount());
    println!("Fingerprint: {}", to_hex(artifact.fingerprint()?));

    Ok(())
}
