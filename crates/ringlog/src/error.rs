//! Error types for ring log operations.

use thiserror::Error;

/// Errors from constructing a [`crate::Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The byte sequence was empty.
    #[error("record is empty")]
    Empty,

    /// The byte sequence did not end with a newline.
    #[error("record does not end with a newline")]
    Unterminated,

    /// A newline appeared before the final byte.
    #[error("record contains an interior newline at byte {0}")]
    InteriorNewline(usize),
}

/// Errors from ring log operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RingLogError {
    /// The seek target does not address a stored byte or a record's
    /// one-past-end boundary.
    #[error("seek target out of range: record {cmd}, offset {offset}")]
    InvalidSeek {
        /// Index of the addressed record, oldest first.
        cmd: usize,
        /// Byte offset within that record.
        offset: usize,
    },
}

/// Errors from decoding a control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ControlError {
    /// The magic/ordinal pair names no supported operation.
    #[error("inappropriate control operation: magic {magic:#04x}, op {op}")]
    Unsupported {
        /// Magic byte of the rejected request.
        magic: u8,
        /// Ordinal of the rejected request.
        op: u8,
    },

    /// The request payload was shorter than the operation requires.
    #[error("control payload too short: expected {expected} bytes, got {actual}")]
    ShortPayload {
        /// Bytes the operation requires.
        expected: usize,
        /// Bytes actually supplied.
        actual: usize,
    },
}

impl ControlError {
    /// Returns `true` if the request named an operation this log does not
    /// implement (as opposed to a malformed payload for a known one).
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
