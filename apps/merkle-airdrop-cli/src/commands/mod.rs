pub mod build;
pub mod pack;
pub mod proof;
pub mod verify;

use crate::error::{CliError, CliResult};
use merkle_airdrop_core::{parse_address, AirdropArtifact, Address};
use std::path::Path;
use tracing::debug;

pub(crate) fn load_artifact(path: &Path) -> CliResult<AirdropArtifact> {
    debug!("Loading artifact from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    Ok(AirdropArtifact::from_json(&json)?)
}

pub(crate) fn parse_recipient(value: &str) -> CliResult<Address> {
    parse_address(value)
        .ok_or_else(|| CliError::InvalidArgument(format!("'{}' is not an address", value)))
}
