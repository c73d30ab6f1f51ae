/*!
# Column Detection

Picks the address and amount columns of a recipient file when they are not configured.
Only the first record is inspected and columns are tried in header order.
*/

use crate::errors::{CsvError, CsvResult};
use crate::records::CsvTable;
use merkle_airdrop_core::{parse_address, parse_amount};

/// First column whose value in the first record is a valid address.
pub fn detect_address_field(table: &CsvTable) -> CsvResult<String> {
    first_matching_column(table, |_, value| parse_address(value).is_some())
        .ok_or(CsvError::NoAddressColumn)
}

/// First column other than `address_field` whose value in the first record parses as an
/// amount.
pub fn detect_amount_field(table: &CsvTable, address_field: &str) -> CsvResult<String> {
    first_matching_column(table, |header, value| {
        header != address_field && parse_amount(value).is_ok()
    })
    .ok_or_else(|| CsvError::NoAmountColumn(address_field.to_string()))
}

fn first_matching_column<F>(table: &CsvTable, matches: F) -> Option<String>
where
    F: Fn(&str, &str) -> bool,
{
    let first = table.records.first()?;
    table
        .headers
        .iter()
        .find(|header| first.get(header).is_some_and(|value| matches(header, value)))
        .cloned()
}
