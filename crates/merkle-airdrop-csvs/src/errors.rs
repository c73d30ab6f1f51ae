use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV file has a header but no records")]
    Empty,

    #[error("Missing required header: {0}")]
    MissingHeader(String),

    #[error("Header '{0}' appears more than once")]
    DuplicateHeader(String),

    #[error("No column holds an address in the first record")]
    NoAddressColumn,

    #[error("No column other than '{0}' holds an amount in the first record")]
    NoAmountColumn(String),
}
