use bytes::{Buf, BytesMut};
use memchr::memchr;
use ringlog::Record;
use tokio_util::codec::Decoder;
use tracing::warn;

use crate::error::FramingError;

/// A decoder that splits a byte stream into LF-terminated [`Record`]s.
///
/// Each yielded record includes its trailing LF. Bytes after the last LF
/// stay buffered until more input arrives; at end-of-stream they are
/// discarded. Frames whose LF lies beyond `max_length` are dropped whole,
/// LF included, to keep the partial buffer bounded against LF-less floods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDecoder {
    /// Longest accepted frame, terminator included.
    max_length: usize,
}

impl LineDecoder {
    /// Creates a decoder with no frame length limit.
    pub const fn new() -> Self {
        Self {
            max_length: usize::MAX,
        }
    }

    /// Creates a decoder that discards frames longer than `max_length`
    /// bytes (terminator included).
    pub const fn with_max_length(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Returns the maximum accepted frame length.
    pub const fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineDecoder {
    type Item = Record;
    type Error = FramingError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Record>, Self::Error> {
        loop {
            match memchr(b'\n', src) {
                None => return Ok(None),
                Some(idx) if idx + 1 > self.max_length => {
                    warn!(
                        frame_len = idx + 1,
                        max_length = self.max_length,
                        "discarding frame larger than max_length"
                    );
                    src.advance(idx + 1);
                }
                Some(idx) => {
                    let frame = src.split_to(idx + 1);
                    return Ok(Some(Record::new(frame.to_vec())?));
                }
            }
        }
    }

    /// Unterminated bytes at end-of-stream are dropped, never emitted.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Record>, Self::Error> {
        if let Some(record) = self.decode(src)? {
            return Ok(Some(record));
        }
        if !src.is_empty() {
            warn!(
                discarded = src.len(),
                "discarding unterminated trailer at end of stream"
            );
            src.clear();
        }
        Ok(None)
    }
}
