use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecoderError {
    #[error("Google API Key not found. Please add it to your .env file.")]
    MissingApiKey,

    #[error("No columns to parse from file")]
    EmptyTable,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Workbook contains no worksheets")]
    NoWorksheet,

    #[error("Completion failed: {0}")]
    CompletionFailed(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecoderError>;
