/*!
# Merkle Airdrop CSV Input

Reads recipient lists into the ordered [`Record`](merkle_airdrop_core::Record) set the
assembler consumes.

## File Shape

- First line is the header. Column names are free-form.
- One recipient per line. Line order is leaf order, so the file fixes every `id`.
- Surrounding whitespace is trimmed from headers and values.

Column names do not have to be configured: [`detect_address_field`] and
[`detect_amount_field`] pick them from the first record.

## Usage

```rust,no_run
use merkle_airdrop_core::{assemble, AssembleConfig};
use merkle_airdrop_csvs::{detect_address_field, detect_amount_field, read_records};

fn example() -> Result<(), Box<dyn std::error::Error>> {
    let table = read_records("recipients.csv", &[])?;
    let address = detect_address_field(&table)?;
    let amount = detect_amount_field(&table, &address)?;

    let artifact = assemble(&table.records, &AssembleConfig::new(address, amount))?;
    println!("{}", artifact.to_json_pretty()?);
    Ok(())
}
```
*/

pub mod detection;
pub mod errors;
pub mod records;

// Re-export main types for convenience
pub use detection::{detect_address_field, detect_amount_field};
pub use errors::{CsvError, CsvResult};
pub use records::{read_records, read_records_from_reader, write_records, CsvTable};
