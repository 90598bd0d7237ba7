//! Configuration: colors, settings from the environment, validation.

pub mod color;
pub mod settings;
pub mod validation;

pub use color::Color;
pub use settings::Settings;

use std::path::PathBuf;

use image_engine::QrStyle;

/// Everything one generation needs besides the data itself.
///
/// Passed explicitly to each call; nothing is remembered between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub foreground: Color,
    pub background: Color,
    pub logo: Option<PathBuf>,
    pub module_size: u32,
    pub border: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Settings::default().generation()
    }
}

impl GenerationConfig {
    pub fn style(&self) -> QrStyle {
        QrStyle {
            foreground: self.foreground.rgb(),
            background: self.background.rgb(),
            module_size: self.module_size,
            border: self.border,
        }
    }

    /// Builder: set the logo path.
    pub fn with_logo(mut self, logo: impl Into<PathBuf>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Builder: set module colors.
    pub fn with_colors(mut self, foreground: Color, background: Color) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }
}
