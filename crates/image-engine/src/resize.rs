//! Aspect-ratio-preserving downscaling for logos.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Shrink an image so it fits inside `max_width` x `max_height`.
///
/// Uses Lanczos3 filtering. Images that already fit are returned unchanged;
/// this never upscales.
pub fn fit_within(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (orig_w, orig_h) = (img.width(), img.height());

    if orig_w <= max_width && orig_h <= max_height {
        debug!(orig_w, orig_h, "Image already fits, skipping resize");
        return img.clone();
    }

    let ratio = (f64::from(max_width) / f64::from(orig_w))
        .min(f64::from(max_height) / f64::from(orig_h));
    let new_width = ((f64::from(orig_w) * ratio).round() as u32).clamp(1, max_width.max(1));
    let new_height = ((f64::from(orig_h) * ratio).round() as u32).clamp(1, max_height.max(1));

    debug!(
        orig_w,
        orig_h, new_width, new_height, "Downscaling image to fit"
    );

    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}
