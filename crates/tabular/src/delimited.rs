//! Comma-separated input.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{Dataset, Result};

/// Read a CSV file whose first record is the header.
pub fn read_csv_file(path: &Path) -> Result<Dataset> {
    read_csv(File::open(path)?)
}

/// Read CSV from any reader. Rows may be ragged; they are normalized by
/// [`Dataset::new`]. Fully blank lines are skipped.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(Dataset::new(columns, rows))
}
