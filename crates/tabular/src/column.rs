//! Spreadsheet-style column letters.

use crate::{DatasetError, Result};

/// Map a single case-insensitive letter to a zero-based column index.
///
/// `A` is 0, `B` is 1, and so on. Anything other than exactly one ASCII
/// letter is rejected.
pub fn column_index(letter: &str) -> Result<usize> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Ok(usize::from(c.to_ascii_uppercase() as u8 - b'A'))
        }
        _ => Err(DatasetError::InvalidColumnLetter(letter.to_owned())),
    }
}

/// Inverse of [`column_index`] for messages. Indices past `Z` render as `?`.
pub fn column_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
        .unwrap_or('?')
}
