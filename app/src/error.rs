//! Error taxonomy shared by every command.

use std::path::PathBuf;

use image_engine::ImageEngineError;
use payload_codec::CodecError;
use tabular::DatasetError;

/// Every failure a command can report.
#[derive(Debug, thiserror::Error)]
pub enum VericodeError {
    /// Missing or malformed user input.
    #[error("{0}")]
    Validation(String),

    /// Unreadable dataset or bad column selection.
    #[error(transparent)]
    Dataset(DatasetError),

    /// Logo could not be decoded. Recoverable: generation continues without it.
    #[error(transparent)]
    Logo(ImageEngineError),

    /// Payload cannot be authenticated, decrypted or parsed.
    #[error("Could not decode payload: {0}")]
    Decode(#[source] CodecError),

    #[error("No QR found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("Data too long for a QR code ({len} bytes)")]
    Capacity { len: usize },

    #[error(transparent)]
    Image(ImageEngineError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VericodeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Message shown to the user at the command boundary.
    ///
    /// A decode failure cannot tell a wrong password from corrupt data, so it
    /// says both.
    pub fn user_message(&self) -> String {
        match self {
            Self::Decode(_) => "Invalid password or corrupt data".into(),
            Self::NotFound(_) => "No QR found".into(),
            other => other.to_string(),
        }
    }

    /// Recoverable errors degrade the result instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Logo(_))
    }
}

impl From<CodecError> for VericodeError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::EmptyPassword => Self::Validation(e.to_string()),
            other => Self::Decode(other),
        }
    }
}

impl From<ImageEngineError> for VericodeError {
    fn from(e: ImageEngineError) -> Self {
        match e {
            ImageEngineError::Capacity { len } => Self::Capacity { len },
            e @ ImageEngineError::Logo { .. } => Self::Logo(e),
            other => Self::Image(other),
        }
    }
}

impl From<image::ImageError> for VericodeError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(ImageEngineError::Image(e))
    }
}

impl From<DatasetError> for VericodeError {
    fn from(e: DatasetError) -> Self {
        match e {
            DatasetError::InvalidColumnLetter(_) => Self::Validation(e.to_string()),
            other => Self::Dataset(other),
        }
    }
}

/// A batch that stopped early. `written` files are already on disk.
#[derive(Debug, thiserror::Error)]
#[error("Batch aborted after {written} QR codes: {source}")]
pub struct BatchError {
    pub written: usize,
    #[source]
    pub source: VericodeError,
}

impl BatchError {
    pub fn new(written: usize, source: impl Into<VericodeError>) -> Self {
        Self {
            written,
            source: source.into(),
        }
    }
}

/// Result type alias for vericode commands.
pub type Result<T> = std::result::Result<T, VericodeError>;
