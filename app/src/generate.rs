//! Single-item generation: payload encoding, rendering and logo overlay.

use std::path::Path;

use image::{DynamicImage, RgbImage};
use image_engine::{load_logo, overlay_logo, render_qr};
use tracing::{info, warn};

use crate::config::GenerationConfig;
use crate::error::{Result, VericodeError};

/// One generated image plus any recoverable problem met on the way.
#[derive(Debug)]
pub struct Generated {
    pub image: RgbImage,
    /// Set when the configured logo could not be decoded and was skipped.
    pub logo_error: Option<VericodeError>,
}

/// Render `data` at level H in the configured colors and overlay `logo`.
///
/// Pure function of its inputs.
pub fn render_item(
    data: &str,
    config: &GenerationConfig,
    logo: Option<&DynamicImage>,
) -> Result<RgbImage> {
    let style = config.style();
    let qr = render_qr(data, &style)?;
    Ok(overlay_logo(qr, logo, style.background))
}

/// Decode the configured logo, if any.
///
/// `Ok(None)` means no logo was configured; a decode failure is returned as
/// a recoverable [`VericodeError::Logo`].
pub fn load_configured_logo(config: &GenerationConfig) -> Result<Option<DynamicImage>> {
    match &config.logo {
        Some(path) => Ok(Some(load_logo(path)?)),
        None => Ok(None),
    }
}

/// Generate one QR image from user text.
///
/// `password` set means the user asked for protection; it must then be
/// non-empty. A logo that fails to decode does not fail the generation.
pub fn generate(data: &str, password: Option<&str>, config: &GenerationConfig) -> Result<Generated> {
    if data.is_empty() {
        return Err(VericodeError::validation("Please enter some data"));
    }
    let payload = payload_codec::encode(data, password)?;

    let (logo, logo_error) = match load_configured_logo(config) {
        Ok(logo) => (logo, None),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "Proceeding without logo");
            (None, Some(e))
        }
        Err(e) => return Err(e),
    };

    let image = render_item(&payload, config, logo.as_ref())?;
    info!(
        width = image.width(),
        protected = password.is_some(),
        logo = logo.is_some(),
        "Generated QR code"
    );
    Ok(Generated { image, logo_error })
}

/// Read text to encode from a file, trimmed of surrounding whitespace.
pub fn read_data_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.trim().to_owned())
}
