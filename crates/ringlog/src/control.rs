//! Control operations on the log, dispatched by magic byte and ordinal.
//!
//! This is the surface the character-device variant exposes: a request is
//! identified by a `(magic, op)` pair and carries a fixed-layout payload.
//! The only supported operation repositions a reader by
//! (record-index, intra-record-offset); everything else is rejected the
//! classic way: "not a typewriter".

use crate::error::ControlError;
use crate::ring::RingLog;
use crate::RingLogError;

/// Magic byte identifying control requests addressed to the log.
pub const CONTROL_MAGIC: u8 = 0x16;

/// Ordinal of the positional-seek operation.
pub const CONTROL_SEEK_OP: u8 = 1;

/// Positional seek coordinates: byte `write_cmd_offset` of the
/// `write_cmd`-th occupied record, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekTo {
    /// Index of the addressed record within the occupied window.
    pub write_cmd: u32,
    /// Byte offset within that record. May equal the record's length
    /// (one-past-end).
    pub write_cmd_offset: u32,
}

impl SeekTo {
    /// Wire size of the encoded coordinates: two little-endian `u32`s.
    pub const ENCODED_LEN: usize = 8;

    /// Decodes coordinates from their wire layout.
    pub fn decode(payload: &[u8]) -> Result<Self, ControlError> {
        if payload.len() < Self::ENCODED_LEN {
            return Err(ControlError::ShortPayload {
                expected: Self::ENCODED_LEN,
                actual: payload.len(),
            });
        }
        let mut cmd = [0u8; 4];
        let mut off = [0u8; 4];
        cmd.copy_from_slice(&payload[0..4]);
        off.copy_from_slice(&payload[4..8]);
        Ok(Self {
            write_cmd: u32::from_le_bytes(cmd),
            write_cmd_offset: u32::from_le_bytes(off),
        })
    }

    /// Encodes the coordinates into their wire layout.
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        let mut buf = [0u8; Self::ENCODED_LEN];
        buf[0..4].copy_from_slice(&self.write_cmd.to_le_bytes());
        buf[4..8].copy_from_slice(&self.write_cmd_offset.to_le_bytes());
        buf
    }

    /// Resolves the coordinates against a log, yielding the absolute
    /// logical position.
    pub fn resolve(&self, log: &RingLog) -> Result<u64, RingLogError> {
        log.seek_to(self.write_cmd as usize, self.write_cmd_offset as usize)
    }
}

/// A decoded control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    /// Reposition a reader to the given coordinates.
    Seek(SeekTo),
}

impl ControlRequest {
    /// Decodes a request from its dispatch pair and payload.
    ///
    /// Unknown `(magic, op)` pairs fail with [`ControlError::Unsupported`];
    /// no state is touched on any failure path.
    pub fn decode(magic: u8, op: u8, payload: &[u8]) -> Result<Self, ControlError> {
        match (magic, op) {
            (CONTROL_MAGIC, CONTROL_SEEK_OP) => Ok(Self::Seek(SeekTo::decode(payload)?)),
            _ => Err(ControlError::Unsupported { magic, op }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn populated_log() -> RingLog {
        let mut log = RingLog::new();
        for i in 0..5 {
            log.append(Record::from_line(&format!("cmd{i}")).unwrap());
        }
        log
    }

    #[test]
    fn test_decode_seek_round_trip() {
        let seek = SeekTo {
            write_cmd: 3,
            write_cmd_offset: 2,
        };
        let decoded = ControlRequest::decode(CONTROL_MAGIC, CONTROL_SEEK_OP, &seek.encode());
        assert_eq!(decoded, Ok(ControlRequest::Seek(seek)));
    }

    #[test]
    fn test_unknown_magic_is_not_a_typewriter() {
        let err = ControlRequest::decode(0x42, CONTROL_SEEK_OP, &[0; 8]).unwrap_err();
        assert!(err.is_unsupported());

        let err = ControlRequest::decode(CONTROL_MAGIC, 9, &[0; 8]).unwrap_err();
        assert_eq!(err, ControlError::Unsupported { magic: CONTROL_MAGIC, op: 9 });
    }

    #[test]
    fn test_short_payload_rejected() {
        let err = ControlRequest::decode(CONTROL_MAGIC, CONTROL_SEEK_OP, &[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ControlError::ShortPayload {
                expected: SeekTo::ENCODED_LEN,
                actual: 3
            }
        );
    }

    #[test]
    fn test_resolve_against_log() {
        let log = populated_log();
        // Each record "cmdN\n" is five bytes.
        let seek = SeekTo {
            write_cmd: 2,
            write_cmd_offset: 1,
        };
        assert_eq!(seek.resolve(&log), Ok(11));
        assert_eq!(log.read_at(11, 1024), b"md2\n");
    }

    #[test]
    fn test_resolve_one_past_end_is_valid() {
        let log = populated_log();
        let seek = SeekTo {
            write_cmd: 4,
            write_cmd_offset: 5,
        };
        assert_eq!(seek.resolve(&log), Ok(log.logical_size()));

        let seek = SeekTo {
            write_cmd: 4,
            write_cmd_offset: 6,
        };
        assert!(seek.resolve(&log).is_err());
    }
}
