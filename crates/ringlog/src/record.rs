//! The atomic unit stored in the log.

use crate::error::RecordError;

/// An immutable newline-terminated byte sequence.
///
/// By construction a record is at least one byte long, its final byte is
/// `\n`, and no earlier byte is `\n`. The length reported by [`len`]
/// includes the trailing newline.
///
/// Records are created by the framing layer, owned by the [`crate::RingLog`]
/// once appended, and returned to the caller on eviction.
///
/// [`len`]: Record::len
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    bytes: Box<[u8]>,
}

impl Record {
    /// Creates a record from raw bytes, validating the framing contract.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, RecordError> {
        let bytes = bytes.into();
        match bytes.last() {
            None => return Err(RecordError::Empty),
            Some(&last) if last != b'\n' => return Err(RecordError::Unterminated),
            Some(_) => {}
        }
        if let Some(idx) = bytes[..bytes.len() - 1].iter().position(|&b| b == b'\n') {
            return Err(RecordError::InteriorNewline(idx));
        }
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    /// Creates a record from a line body, appending the newline terminator.
    ///
    /// Fails if `line` itself contains a newline.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        Self::new(bytes)
    }

    /// The record's bytes, trailing newline included.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The record's length in bytes, trailing newline included. Always ≥ 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; present for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl AsRef<[u8]> for Record {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Record({:?})", String::from_utf8_lossy(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_terminated_bytes() {
        let record = Record::new(b"hello\n".to_vec()).unwrap();
        assert_eq!(record.as_bytes(), b"hello\n");
        assert_eq!(record.len(), 6);
    }

    #[test]
    fn test_bare_newline_is_a_record() {
        let record = Record::new(b"\n".to_vec()).unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Record::new(Vec::new()), Err(RecordError::Empty));
    }

    #[test]
    fn test_rejects_unterminated() {
        assert_eq!(
            Record::new(b"hello".to_vec()),
            Err(RecordError::Unterminated)
        );
    }

    #[test]
    fn test_rejects_interior_newline() {
        assert_eq!(
            Record::new(b"a\nb\n".to_vec()),
            Err(RecordError::InteriorNewline(1))
        );
    }

    #[test]
    fn test_from_line_appends_terminator() {
        let record = Record::from_line("abc").unwrap();
        assert_eq!(record.as_bytes(), b"abc\n");
    }

    #[test]
    fn test_from_line_rejects_embedded_newline() {
        assert!(Record::from_line("a\nb").is_err());
    }
}
