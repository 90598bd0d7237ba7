//! Runtime settings loaded from defaults + environment overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::validation::validate_setting;
use super::GenerationConfig;
use crate::error::{Result, VericodeError};

/// Defaults for every generation, before command-line flags are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub foreground: Color,
    pub background: Color,
    pub logo: Option<PathBuf>,
    pub module_size: u32,
    pub border: u32,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
            module_size: 10,
            border: 4,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup. Unset or empty keys keep
    /// their defaults; set keys must validate.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let g = |key: &str| -> Result<Option<String>> {
            match lookup(key).filter(|v| !v.is_empty()) {
                Some(v) => {
                    validate_setting(key, &v)
                        .map_err(|msg| VericodeError::validation(format!("{key}: {msg}")))?;
                    Ok(Some(v))
                }
                None => Ok(None),
            }
        };

        let mut settings = Self::default();
        if let Some(v) = g("VERICODE_FOREGROUND")? {
            settings.foreground = parse_color(&v)?;
        }
        if let Some(v) = g("VERICODE_BACKGROUND")? {
            settings.background = parse_color(&v)?;
        }
        if let Some(v) = g("VERICODE_LOGO")? {
            settings.logo = Some(PathBuf::from(v));
        }
        if let Some(v) = g("VERICODE_MODULE_SIZE")? {
            settings.module_size = parse_u32(&v)?;
        }
        if let Some(v) = g("VERICODE_BORDER")? {
            settings.border = parse_u32(&v)?;
        }
        if let Some(v) = g("VERICODE_OUTPUT_DIR")? {
            settings.output_dir = PathBuf::from(v);
        }
        Ok(settings)
    }

    /// Per-invocation generation config derived from these settings.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            foreground: self.foreground,
            background: self.background,
            logo: self.logo.clone(),
            module_size: self.module_size,
            border: self.border,
        }
    }
}

fn parse_color(s: &str) -> Result<Color> {
    s.parse().map_err(VericodeError::Validation)
}

fn parse_u32(s: &str) -> Result<u32> {
    s.parse()
        .map_err(|_| VericodeError::validation(format!("'{s}' is not a valid number")))
}
