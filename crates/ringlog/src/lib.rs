//! Ringlog - Bounded Append Log of Newline-Terminated Records
//!
//! A fixed-capacity ring of variable-length byte records. Appending into a
//! full ring evicts the oldest record and hands it back to the caller. The
//! occupied records form one logical byte stream that can be read at any
//! byte offset, and a positional seek translates a
//! (record-index, intra-record-offset) pair into an absolute stream
//! position.
//!
//! # Key properties
//!
//! - Eviction is part of `append`, never a failure: full is the normal
//!   steady state.
//! - `read_at` never crosses a record boundary; callers loop to stream the
//!   whole log.
//! - Reading past the end of the stream yields zero bytes, not an error.
//! - Seek coordinates are relative to the current occupied window (index 0
//!   is the oldest record still stored).
//!
//! # Example
//!
//! ```
//! use ringlog::{Record, RingLog};
//!
//! let mut log = RingLog::new();
//! log.append(Record::from_line("hello").unwrap());
//! log.append(Record::from_line("world").unwrap());
//!
//! assert_eq!(log.logical_size(), 12);
//! assert_eq!(log.read_at(6, 1024), b"world\n");
//! assert_eq!(log.seek_to(1, 0).unwrap(), 6);
//! ```

mod control;
mod error;
mod invariants;
mod record;
mod ring;

pub use control::{ControlRequest, SeekTo, CONTROL_MAGIC, CONTROL_SEEK_OP};
pub use error::{ControlError, RecordError, RingLogError};
pub use record::Record;
pub use ring::{RingLog, DEFAULT_CAPACITY};
