//! In-memory tabular dataset.

use std::path::Path;

use tracing::info;

use crate::column::column_letter;
use crate::{DatasetError, Result, delimited, spreadsheet};

/// Ordered columns and rows; every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset, padding short rows with empty cells and dropping
    /// cells beyond the header width. Blank header names become
    /// `Unnamed: <index>`.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns: Vec<String> = columns
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                if name.trim().is_empty() {
                    format!("Unnamed: {i}")
                } else {
                    name
                }
            })
            .collect();
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ensure `index` names an existing column.
    pub fn check_column(&self, index: usize) -> Result<()> {
        if index >= self.columns.len() {
            return Err(DatasetError::ColumnOutOfRange {
                letter: column_letter(index),
                index,
                columns: self.columns.len(),
            });
        }
        Ok(())
    }
}

/// Load a dataset, choosing the parser from the file extension.
///
/// `.csv` is read as comma-separated text; `.xlsx`, `.xlsm`, `.xlsb`,
/// `.xls` and `.ods` are read from their first worksheet. The first row is
/// the header in both cases.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let dataset = match ext.as_str() {
        "csv" => delimited::read_csv_file(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => spreadsheet::read_first_sheet(path)?,
        _ => return Err(DatasetError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(
        path = %path.display(),
        columns = dataset.columns().len(),
        rows = dataset.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}
