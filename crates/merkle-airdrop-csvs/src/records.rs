/*!
# CSV Reading & Writing

Every line becomes one [`Record`] keyed by header name. Nothing is parsed here: address
and amount validation belongs to the leaf encoder, which reports the failing record.
*/

use crate::errors::{CsvError, CsvResult};
use csv::{ReaderBuilder, Trim, Writer};
use merkle_airdrop_core::Record;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A recipient file: header names in file order plus one record per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl CsvTable {
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header == name)
    }
}

// ================================================================================================
// CSV Reading with Validation
// ================================================================================================

/// Read a recipient file, requiring every header in `required`.
pub fn read_records<P: AsRef<Path>>(path: P, required: &[&str]) -> CsvResult<CsvTable> {
    let file = File::open(path)?;
    read_records_from_reader(file, required)
}

pub fn read_records_from_reader<R: Read>(reader: R, required: &[&str]) -> CsvResult<CsvTable> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    validate_headers(&headers, required)?;

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let record: Record = headers.iter().map(String::as_str).zip(row.iter()).collect();
        records.push(record);
    }

    if records.is_empty() {
        return Err(CsvError::Empty);
    }

    Ok(CsvTable { headers, records })
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Write `table` back out in header order. Columns a record lacks are written empty.
pub fn write_records<P: AsRef<Path>>(path: P, table: &CsvTable) -> CsvResult<()> {
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(&table.headers)?;
    for record in &table.records {
        wtr.write_record(
            table
                .headers
                .iter()
                .map(|header| record.get(header).unwrap_or_default()),
        )?;
    }

    wtr.flush()?;
    Ok(())
}

// ================================================================================================
// Header Validation
// ================================================================================================

fn validate_headers(headers: &[String], required: &[&str]) -> CsvResult<()> {
    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(CsvError::DuplicateHeader(header.clone()));
        }
    }

    match required.iter().find(|name| !seen.contains(**name)) {
        Some(missing) => Err(CsvError::MissingHeader(missing.to_string())),
        None => Ok(()),
    }
}

// ================================================================================================
// Tests
// ================================================================================================
