use crate::config::{BuildConfig, BuildOverrides};
use crate::error::CliResult;
use merkle_airdrop_core::{assemble, to_hex, AirdropArtifact};
use merkle_airdrop_csvs::read_records;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn execute(
    input: PathBuf,
    config: Option<PathBuf>,
    overrides: BuildOverrides,
    output: PathBuf,
) -> CliResult<()> {
    let artifact = build(&input, config.as_deref(), overrides)?;

    if output.exists() {
        info!("Overwriting existing artifact {}", output.display());
    }
    std::fs::write(&output, artifact.to_json_pretty()?)?;

    println!("Root: {}", to_hex(artifact.root));
    println!("Awards: {}", artifact.awards.len());
    println!("Total amount: {}", artifact.total_amount());
    println!("Fingerprint: {}", to_hex(artifact.fingerprint()?));
    println!("Artifact written to: {}", output.display());

    Ok(())
}

pub(crate) fn build(
    input: &Path,
    config: Option<&Path>,
    overrides: BuildOverrides,
) -> CliResult<AirdropArtifact> {
    let config = BuildConfig::load(config)?.with_overrides(overrides);

    info!("Reading recipients from {}", input.display());
    let table = read_records(input, &[])?;
    info!("Read {} records", table.records.len());

    let assemble_config = config.resolve(&table)?;
    Ok(assemble(&table.records, &assemble_config)?)
}
