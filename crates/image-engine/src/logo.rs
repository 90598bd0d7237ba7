//! Logo loading.

use std::path::Path;

use image::DynamicImage;

use crate::{ImageEngineError, Result};

/// Decode a logo from disk.
///
/// Any open or decode failure maps to [`ImageEngineError::Logo`], which
/// callers treat as recoverable.
pub fn load_logo(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|source| ImageEngineError::Logo {
        path: path.to_path_buf(),
        source,
    })
}
