//! Tabular record sources for batch generation.
//!
//! Loads comma-separated and spreadsheet files into an ordered [`Dataset`]
//! of named columns with display-string cells, and maps spreadsheet-style
//! column letters to indices.

pub mod column;
pub mod dataset;
pub mod delimited;
pub mod spreadsheet;

pub use column::column_index;
pub use dataset::{Dataset, load_dataset};

use std::path::PathBuf;

/// Errors that can occur while selecting columns or loading records.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Please enter a single letter (e.g., A, B), got '{0}'")]
    InvalidColumnLetter(String),

    #[error("Column '{letter}' does not exist in the file ({columns} columns)")]
    ColumnOutOfRange {
        letter: char,
        index: usize,
        columns: usize,
    },

    #[error("Unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Identifier '{0}' cannot be used as a file name")]
    InvalidIdentifier(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Spreadsheet has no worksheets")]
    NoSheets,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
