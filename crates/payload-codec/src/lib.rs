//! Optional encryption layer around the text stored in a QR symbol.
//!
//! A protected payload is `<ciphertext-token>|<key-token>`: a Fernet token
//! followed by the freshly generated key that opens it. Both tokens use the
//! URL-safe base64 alphabet, so neither can contain the separator.

pub mod codec;

pub use codec::{Decoded, SEPARATOR, decode, encode, is_protected};

/// Errors that can occur while encoding or decoding a payload.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Password required")]
    EmptyPassword,

    #[error("Key token is malformed")]
    MalformedKey,

    #[error("Ciphertext failed authentication")]
    Authentication,

    #[error("Decrypted payload is not valid UTF-8")]
    InvalidUtf8,
}

impl CodecError {
    /// True for the errors that mean "this payload cannot be opened".
    pub fn is_decode_failure(&self) -> bool {
        !matches!(self, Self::EmptyPassword)
    }
}

/// Result type alias for payload codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
