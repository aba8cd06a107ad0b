//! ---
//! exo_section: "11-simulation"
//! exo_subsection: "module"
//! exo_type: "source"
//! exo_scope: "code"
//! exo_description: "Error types for the synthesis pipeline."
//! exo_version: "v0.1.0"
//! exo_owner: "tbd"
//! ---
use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("date range starts on {from} which is after its end {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
    #[error("series '{field}' has {actual} entries, expected {expected}")]
    SeriesLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
