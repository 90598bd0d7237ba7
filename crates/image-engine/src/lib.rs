//! Raster side of QR generation and scanning.
//!
//! Renders level-H QR symbols in arbitrary module colors, overlays a centered
//! logo plate, and detects symbols in scanned images.

pub mod compose;
pub mod detect;
pub mod logo;
pub mod qr;
pub mod resize;

// Re-exports for convenience
pub use compose::{LOGO_MARGIN, LOGO_SCALE, overlay_logo};
pub use detect::{GridDetector, SymbolDetector};
pub use logo::load_logo;
pub use qr::{QrStyle, render_qr};
pub use resize::fit_within;

use std::path::PathBuf;

/// Errors that can occur while rendering or compositing.
#[derive(Debug, thiserror::Error)]
pub enum ImageEngineError {
    #[error("Data too long for a level-H QR symbol ({len} bytes)")]
    Capacity { len: usize },

    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("Could not embed logo {}: {source}", path.display())]
    Logo {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for image-engine operations.
pub type Result<T> = std::result::Result<T, ImageEngineError>;
