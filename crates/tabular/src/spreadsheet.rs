//! Spreadsheet input (first worksheet only).

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use crate::{Dataset, DatasetError, Result};

/// Read the first worksheet; the first row of its used range is the header.
///
/// Columns stay anchored at `A` even when the used range starts further
/// right, so column letters match what the user sees.
pub fn read_first_sheet(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::NoSheets)??;

    let first_col = range.start().map(|(_, c)| c as usize).unwrap_or(0);
    debug!(first_col, rows = range.height(), "Reading worksheet");

    let mut lines = range.rows().map(|cells| {
        std::iter::repeat_n(String::new(), first_col)
            .chain(cells.iter().map(cell_text))
            .collect::<Vec<String>>()
    });

    let columns = lines.next().unwrap_or_default();
    let rows = lines
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();
    Ok(Dataset::new(columns, rows))
}

/// Display form of a cell. Whole floats print without a fraction.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cell_text_forms() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Float(101.0)), "101");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::String("Asha".into())), "Asha");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
    }

    #[test]
    fn unreadable_workbook_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert!(matches!(
            read_first_sheet(&path),
            Err(DatasetError::Spreadsheet(_))
        ));
    }

    #[test]
    fn first_sheet_header_and_rows() {
        let dataset = read_first_sheet(&fixture("students.xlsx")).unwrap();
        assert_eq!(dataset.columns(), strings(&["Roll", "Name"]).as_slice());

        // Row 4 is blank inside the used range and is dropped.
        let rows: Vec<Vec<String>> = dataset.rows().map(<[String]>::to_vec).collect();
        assert_eq!(
            rows,
            vec![
                strings(&["101", "Asha"]),
                strings(&["", "Ravi"]),
                strings(&["103", "Omar"]),
            ]
        );
    }

    #[test]
    fn used_range_starting_at_b_stays_anchored_at_a() {
        let dataset = read_first_sheet(&fixture("offset.xlsx")).unwrap();
        assert_eq!(
            dataset.columns(),
            strings(&["Unnamed: 0", "Roll", "Name"]).as_slice()
        );
        let first = dataset.rows().next().unwrap();
        assert_eq!(first, strings(&["", "101", "Asha"]).as_slice());
    }

    #[test]
    fn load_dataset_dispatches_xlsx() {
        let dataset = crate::load_dataset(&fixture("students.xlsx")).unwrap();
        assert_eq!(dataset.len(), 3);
        dataset.check_column(1).unwrap();
        assert!(dataset.check_column(2).is_err());
    }
}
