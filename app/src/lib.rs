//! QR code generation and scanning with optional payload encryption,
//! centered logos and batch generation from tabular files.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod scan;

#[cfg(test)]
mod tests;

pub use config::{Color, GenerationConfig, Settings};
pub use error::{BatchError, Result, VericodeError};

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

/// Load `.env`, then settings from the environment.
pub fn init_settings() -> Result<Settings> {
    load_dotenv();
    let settings = Settings::load()?;
    tracing::debug!(?settings, "Settings loaded");
    Ok(settings)
}
