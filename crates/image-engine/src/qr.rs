//! QR symbol rendering at error-correction level H.

use image::{Rgb, RgbImage};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::{ImageEngineError, Result};

/// Module colors and geometry for a rendered symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrStyle {
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
    /// Edge length of one module in pixels.
    pub module_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
}

impl Default for QrStyle {
    fn default() -> Self {
        Self {
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
            module_size: 10,
            border: 4,
        }
    }
}

/// Render `data` as a level-H QR symbol.
///
/// The smallest version that fits is chosen. The result is a square RGB
/// image of `(modules + 2 * border) * module_size` pixels per side.
pub fn render_qr(data: &str, style: &QrStyle) -> Result<RgbImage> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H).map_err(
        |e| match e {
            QrError::DataTooLong => ImageEngineError::Capacity { len: data.len() },
            other => ImageEngineError::Encode(other.to_string()),
        },
    )?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = style.module_size.max(1);
    let img_size = (module_count + 2 * style.border) * scale;
    let offset = style.border * scale;

    debug!(module_count, scale, img_size, "Rendering QR symbol");

    let mut img = RgbImage::from_pixel(img_size, img_size, style.background);

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(
                        offset + x * scale + dx,
                        offset + y * scale + dy,
                        style.foreground,
                    );
                }
            }
        }
    }

    Ok(img)
}
