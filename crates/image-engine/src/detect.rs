//! QR symbol detection in scanned rasters.

use image::DynamicImage;
use tracing::debug;

/// Finds a QR symbol in an image and returns its raw text.
pub trait SymbolDetector {
    /// Returns `None` when no decodable symbol is present.
    fn detect(&self, image: &DynamicImage) -> Option<String>;
}

/// Detector backed by `rqrr` grid search on the grayscale image.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridDetector;

impl SymbolDetector for GridDetector {
    fn detect(&self, image: &DynamicImage) -> Option<String> {
        let luma = image.to_luma8();
        let (w, h) = luma.dimensions();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            w as usize,
            h as usize,
            |x, y| luma.get_pixel(x as u32, y as u32)[0],
        );

        let grids = prepared.detect_grids();
        debug!(w, h, grids = grids.len(), "Scanned image for QR grids");

        for grid in grids {
            match grid.decode() {
                Ok((_, content)) if !content.is_empty() => return Some(content),
                Ok(_) => {}
                Err(e) => debug!(error = ?e, "Grid failed to decode"),
            }
        }
        None
    }
}
