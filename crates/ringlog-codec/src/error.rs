//! Error types for frame decoding.

use ringlog::RecordError;
use thiserror::Error;

/// Errors that can occur while decoding records from a byte stream.
#[derive(Debug, Error)]
pub enum FramingError {
    /// The underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A completed frame violated the record contract.
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] RecordError),
}

impl FramingError {
    /// Returns `true` if the error came from the transport rather than the
    /// frame contents.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
