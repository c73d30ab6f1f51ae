use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use config::BuildOverrides;
use error::CliResult;

#[derive(Parser)]
#[command(name = "merkle-airdrop")]
#[command(about = "Merkle airdrop builder - roots, proofs and claim call data for token distributions")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the merkle root and every award proof from a recipients CSV
    Build {
        /// Recipients CSV (one recipient per line, header required)
        input: PathBuf,

        /// Build configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Column holding the recipient address (detected when omitted)
        #[arg(long)]
        address_field: Option<String>,

        /// Column holding the amount in base units (detected when omitted)
        #[arg(long)]
        amount_field: Option<String>,

        /// Extra column carried into the leaf, repeatable and order-sensitive
        #[arg(long = "extra-field")]
        extra_fields: Vec<String>,

        /// Fail when an address appears more than once
        #[arg(long)]
        reject_duplicates: bool,

        /// Artifact output path
        #[arg(short, long, default_value = "airdrop.json")]
        output: PathBuf,
    },

    /// Print single-claim call data for an award
    Proof {
        /// Artifact produced by `build`
        artifact: PathBuf,

        /// Award id
        #[arg(long, conflicts_with = "address")]
        id: Option<u64>,

        /// Every award for this address
        #[arg(long)]
        address: Option<String>,
    },

    /// Check every proof in an artifact and that the awards rebuild its root
    Verify {
        /// Artifact produced by `build`
        artifact: PathBuf,
    },

    /// Print batch-claim call data for one recipient
    Pack {
        /// Artifact produced by `build`
        artifact: PathBuf,

        /// Recipient address
        #[arg(short, long)]
        recipient: String,

        /// Award ids to include (all of the recipient's awards when omitted)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u64>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "merkle_airdrop={},merkle_airdrop_core={}",
            level, level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            config,
            address_field,
            amount_field,
            extra_fields,
            reject_duplicates,
            output,
        } => {
            let overrides = BuildOverrides {
                address_field,
                amount_field,
                extra_fields,
                reject_duplicates,
            };
            commands::build::execute(input, config, overrides, output)
        }

        Commands::Proof {
            artifact,
            id,
            address,
        } => commands::proof::execute(artifact, id, address),

        Commands::Verify { artifact } => commands::verify::execute(artifact),

        Commands::Pack {
            artifact,
            recipient,
            ids,
        } => commands::pack::execute(artifact, recipient, ids),
    }
}
