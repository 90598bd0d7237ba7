//! Scan path: detected symbol text back to the user's plaintext.

use std::path::Path;

use image_engine::SymbolDetector;
use tracing::info;

use crate::error::{Result, VericodeError};

/// Asks the user for a password when a protected payload is scanned.
///
/// The answer only confirms intent; the key travels inside the payload.
pub trait PasswordPrompt {
    /// `None` when the user cancels.
    fn prompt(&mut self) -> Option<String>;
}

impl<F: FnMut() -> Option<String>> PasswordPrompt for F {
    fn prompt(&mut self) -> Option<String> {
        self()
    }
}

/// Plaintext recovered from a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    pub text: String,
    pub was_protected: bool,
}

/// Decode raw symbol text, prompting for a password only when it is protected.
///
/// A cancelled or empty prompt stops the scan with a validation error. A
/// payload that fails to decrypt is a [`VericodeError::Decode`].
pub fn decode_scanned(raw: &str, prompt: &mut dyn PasswordPrompt) -> Result<Scanned> {
    if payload_codec::is_protected(raw) {
        let password = prompt.prompt().filter(|p| !p.is_empty());
        if password.is_none() {
            return Err(VericodeError::validation("Password required"));
        }
    }

    let decoded = payload_codec::decode(raw)?;
    Ok(Scanned {
        text: decoded.text,
        was_protected: decoded.was_protected,
    })
}

/// Detect and decode the QR symbol in an image file.
pub fn scan_file(
    path: &Path,
    detector: &dyn SymbolDetector,
    prompt: &mut dyn PasswordPrompt,
) -> Result<Scanned> {
    let image = image::open(path)?;
    let raw = detector
        .detect(&image)
        .ok_or_else(|| VericodeError::NotFound(path.to_path_buf()))?;

    let scanned = decode_scanned(&raw, prompt)?;
    info!(
        path = %path.display(),
        protected = scanned.was_protected,
        "Scanned QR code"
    );
    Ok(scanned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never() -> impl FnMut() -> Option<String> {
        || panic!("prompt must not be called for plain payloads")
    }

    #[test]
    fn plain_payload_skips_prompt() {
        let scanned = decode_scanned("hello", &mut never()).unwrap();
        assert_eq!(scanned.text, "hello");
        assert!(!scanned.was_protected);
    }

    #[test]
    fn protected_payload_prompts_once() {
        let payload = payload_codec::encode("hello", Some("secret")).unwrap();
        let mut calls = 0;
        let mut prompt = || {
            calls += 1;
            Some("anything".to_string())
        };
        let scanned = decode_scanned(&payload, &mut prompt).unwrap();
        assert_eq!(scanned.text, "hello");
        assert!(scanned.was_protected);
        assert_eq!(calls, 1);
    }

    #[test]
    fn cancelled_prompt_is_validation_error() {
        let payload = payload_codec::encode("hello", Some("secret")).unwrap();
        for answer in [None, Some(String::new())] {
            let mut prompt = move || answer.clone();
            let err = decode_scanned(&payload, &mut prompt).unwrap_err();
            assert!(matches!(err, VericodeError::Validation(_)));
        }
    }

    #[test]
    fn corrupt_payload_is_decode_error() {
        let mut prompt = || Some("pw".to_string());
        let err = decode_scanned("garbage|key", &mut prompt).unwrap_err();
        assert!(matches!(err, VericodeError::Decode(_)));
        assert_eq!(err.user_message(), "Invalid password or corrupt data");
    }
}
