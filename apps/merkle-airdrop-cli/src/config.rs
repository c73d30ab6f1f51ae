use merkle_airdrop_core::{AssembleConfig, DuplicateAddressPolicy};
use merkle_airdrop_csvs::{detect_address_field, detect_amount_field, CsvTable};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{CliError, CliResult};

/// Build configuration file structure (YAML)
///
/// ```yaml
/// address_field: wallet
/// amount_field: tokens
/// extra_fields: [username]
/// duplicate_addresses: reject
/// ```
///
/// Every key is optional. Unset columns are detected from the input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Column holding the recipient address
    pub address_field: Option<String>,

    /// Column holding the amount in base units
    pub amount_field: Option<String>,

    /// Columns carried into the leaf and the award, in this order
    #[serde(default)]
    pub extra_fields: Vec<String>,

    #[serde(default)]
    pub duplicate_addresses: DuplicateAddressPolicy,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct BuildOverrides {
    pub address_field: Option<String>,
    pub amount_field: Option<String>,
    pub extra_fields: Vec<String>,
    pub reject_duplicates: bool,
}

impl BuildConfig {
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                Ok(serde_yaml::from_str(&contents)?)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(mut self, overrides: BuildOverrides) -> Self {
        if overrides.address_field.is_some() {
            self.address_field = overrides.address_field;
        }
        if overrides.amount_field.is_some() {
            self.amount_field = overrides.amount_field;
        }
        if !overrides.extra_fields.is_empty() {
            self.extra_fields = overrides.extra_fields;
        }
        if overrides.reject_duplicates {
            self.duplicate_addresses = DuplicateAddressPolicy::Reject;
        }
        self
    }

    /// Fill unset columns from `table` and check every named column exists.
    pub fn resolve(&self, table: &CsvTable) -> CliResult<AssembleConfig> {
        let address_field = match &self.address_field {
            Some(field) => field.clone(),
            None => {
                let field = detect_address_field(table)?;
                info!("Detected address column '{}'", field);
                field
            }
        };

        let amount_field = match &self.amount_field {
            Some(field) => field.clone(),
            None => {
                let field = detect_amount_field(table, &address_field)?;
                info!("Detected amount column '{}'", field);
                field
            }
        };

        let named = [&address_field, &amount_field]
            .into_iter()
            .chain(self.extra_fields.iter());
        for field in named {
            if !table.has_header(field) {
                return Err(CliError::InvalidArgument(format!(
                    "column '{}' is not in the input header",
                    field
                )));
            }
        }

        Ok(AssembleConfig::new(address_field, amount_field)
            .with_extra_fields(self.extra_fields.iter().cloned())
            .with_duplicate_addresses(self.duplicate_addresses))
    }
}
