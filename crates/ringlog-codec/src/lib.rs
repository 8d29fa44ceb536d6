//! Newline Framing for Ringlog
//!
//! Reassembles LF-terminated [`ringlog::Record`]s from a byte stream that
//! arrives in arbitrary chunks. The decoder plugs into
//! `tokio_util::codec::FramedRead`, which keeps one partial buffer per
//! wrapped stream, giving each connection sole ownership of its
//! unterminated bytes.
//!
//! # Framing contract
//!
//! - A completed record includes its trailing LF.
//! - Bytes are never inspected beyond locating LF, and never dropped:
//!   every byte ends up in a completed record or in the partial tail.
//! - The tail left at end-of-stream is discarded, not emitted; an
//!   unterminated trailer never becomes a record.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use ringlog_codec::LineDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = LineDecoder::new();
//! let mut buf = BytesMut::from(&b"foo\nbar"[..]);
//!
//! let record = decoder.decode(&mut buf).unwrap().unwrap();
//! assert_eq!(record.as_bytes(), b"foo\n");
//! assert!(decoder.decode(&mut buf).unwrap().is_none()); // "bar" waits
//! ```

mod decoder;
mod error;

pub use decoder::LineDecoder;
pub use error::FramingError;
