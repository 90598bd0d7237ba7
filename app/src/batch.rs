//! Batch generation: one QR image per dataset row.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use image_engine::load_logo;
use tabular::{Dataset, DatasetError, column_index, load_dataset};
use tracing::{debug, info, warn};

use crate::config::GenerationConfig;
use crate::error::{BatchError, VericodeError};
use crate::generate::render_item;

/// Outcome of a completed batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Images written; skipped rows do not count.
    pub written: usize,
    /// Rows skipped for an empty identifier.
    pub skipped: usize,
    pub files: Vec<PathBuf>,
    /// Set when the logo failed to decode and later rows went without it.
    pub logo_error: Option<VericodeError>,
}

/// Composite record text: `"<column>: <value>"` joined by `" | "`.
pub fn row_data_string(columns: &[String], row: &[String]) -> String {
    columns
        .iter()
        .zip(row)
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Output file name for an identifier, `"<identifier>.png"`.
///
/// Identifiers that would escape the output directory are rejected.
pub fn identifier_file_name(identifier: &str) -> Result<String, DatasetError> {
    let unsafe_name = identifier == "."
        || identifier == ".."
        || identifier.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(DatasetError::InvalidIdentifier(identifier.to_owned()));
    }
    Ok(format!("{identifier}.png"))
}

/// Generate a PNG per row of `dataset` into `output_dir`.
///
/// The identifier column is checked before anything touches the disk.
/// Identifiers are trimmed; rows left with an empty one are skipped. A logo that fails to decode is
/// dropped for the rest of the batch and the row still counts; any other
/// row failure aborts with the number of files already written.
pub fn run_batch(
    dataset: &Dataset,
    id_column: usize,
    config: &GenerationConfig,
    output_dir: &Path,
) -> Result<BatchSummary, BatchError> {
    dataset
        .check_column(id_column)
        .map_err(|e| BatchError::new(0, e))?;
    std::fs::create_dir_all(output_dir).map_err(|e| BatchError::new(0, e))?;

    let mut logo_path = config.logo.clone();
    let mut summary = BatchSummary::default();

    for row in dataset.rows() {
        let identifier = row[id_column].trim();
        if identifier.is_empty() {
            debug!("Skipping row with empty identifier");
            summary.skipped += 1;
            continue;
        }

        let written = summary.written;
        let file_name = identifier_file_name(identifier).map_err(|e| BatchError::new(written, e))?;
        let data = row_data_string(dataset.columns(), row);

        let loaded = logo_path.as_deref().map(load_logo).transpose();
        let logo = match loaded {
            Ok(logo) => logo,
            Err(e) => {
                let e = VericodeError::from(e);
                warn!(error = %e, "Logo failed to decode, continuing batch without it");
                logo_path = None;
                summary.logo_error = Some(e);
                None
            }
        };

        let image = render_item(&data, config, logo.as_ref()).map_err(|e| BatchError::new(written, e))?;
        let path = output_dir.join(&file_name);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| BatchError::new(written, e))?;

        debug!(identifier = %identifier, path = %path.display(), "Wrote QR code");
        summary.written += 1;
        summary.files.push(path);
    }

    info!(
        written = summary.written,
        skipped = summary.skipped,
        dir = %output_dir.display(),
        "Batch complete"
    );
    Ok(summary)
}

/// Validate the column letter, load the dataset file, then run the batch.
pub fn run_batch_file(
    dataset_path: &Path,
    column_letter: &str,
    config: &GenerationConfig,
    output_dir: &Path,
) -> Result<BatchSummary, BatchError> {
    let id_column = column_index(column_letter).map_err(|e| BatchError::new(0, e))?;
    let dataset = load_dataset(dataset_path).map_err(|e| BatchError::new(0, e))?;
    run_batch(&dataset, id_column, config, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn data_string_format() {
        let columns = strings(&["Roll", "Name"]);
        let row = strings(&["101", "Asha"]);
        assert_eq!(row_data_string(&columns, &row), "Roll: 101 | Name: Asha");
    }

    #[test]
    fn data_string_keeps_empty_cells() {
        let columns = strings(&["Roll", "Name", "Note"]);
        let row = strings(&["7", "", "x"]);
        assert_eq!(row_data_string(&columns, &row), "Roll: 7 | Name:  | Note: x");
    }

    #[test]
    fn file_names() {
        assert_eq!(identifier_file_name("101").unwrap(), "101.png");
        assert_eq!(identifier_file_name("A-7 b").unwrap(), "A-7 b.png");
        for bad in ["..", ".", "a/b", "a\\b"] {
            assert!(identifier_file_name(bad).is_err(), "accepted {bad:?}");
        }
    }
}
