//! Logo compositing onto rendered QR symbols.
//!
//! The logo is shrunk to a fifth of the symbol width, framed by a solid
//! plate, and pasted over the center. Level-H error correction absorbs the
//! occluded modules.

use image::{DynamicImage, Rgb, RgbImage, Rgba, imageops};
use tracing::debug;

use crate::resize::fit_within;

/// Logo edge as a fraction of the QR image width.
pub const LOGO_SCALE: f64 = 0.2;

/// Plate margin around the logo, in pixels.
pub const LOGO_MARGIN: u32 = 10;

/// Overlay `logo` centered on `qr`, framed by a `background` plate.
///
/// Without a logo the QR image is returned untouched. The result always has
/// the dimensions of `qr`.
pub fn overlay_logo(mut qr: RgbImage, logo: Option<&DynamicImage>, background: Rgb<u8>) -> RgbImage {
    let Some(logo) = logo else {
        return qr;
    };

    let (qr_w, qr_h) = qr.dimensions();
    let target = (f64::from(qr_w) * LOGO_SCALE).floor() as u32;
    let fitted = fit_within(logo, target.max(1), target.max(1));

    let side = target + 2 * LOGO_MARGIN;
    let mut plate = RgbImage::from_pixel(side, side, background);
    paste_blended(&mut plate, &fitted, LOGO_MARGIN, LOGO_MARGIN);

    let x = (i64::from(qr_w) - i64::from(side)).div_euclid(2);
    let y = (i64::from(qr_h) - i64::from(side)).div_euclid(2);
    debug!(
        qr_w,
        qr_h,
        logo_w = fitted.width(),
        logo_h = fitted.height(),
        side,
        x,
        y,
        "Overlaying logo plate"
    );

    imageops::replace(&mut qr, &plate, x, y);
    qr
}

/// Paste `top` onto `base` at the given position.
///
/// The `top` image is alpha-composited over the base; pixels falling outside
/// `base` are dropped.
fn paste_blended(base: &mut RgbImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    for (dx, dy, pixel) in top_rgba.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let alpha = pixel[3] as f32 / 255.0;
            if alpha > 0.99 {
                base.put_pixel(target_x, target_y, Rgb([pixel[0], pixel[1], pixel[2]]));
            } else if alpha > 0.01 {
                let bg = base.get_pixel(target_x, target_y);
                let blended = blend_pixel(bg, pixel, alpha);
                base.put_pixel(target_x, target_y, blended);
            }
        }
    }
}

fn blend_pixel(bg: &Rgb<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgb<u8> {
    let inv = 1.0 - alpha;
    Rgb([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
    ])
}
