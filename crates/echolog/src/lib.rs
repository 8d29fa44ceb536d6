//! Echolog - Concurrent Line-Reassembly Server over a Bounded Ring Log
//!
//! A TCP endpoint that receives byte streams from many simultaneous
//! clients, reassembles newline-delimited records across arbitrary packet
//! boundaries, appends each completed record to a shared [`ringlog`] ring,
//! and echoes the ring's entire current contents back to the originating
//! client after every append.
//!
//! # Architecture
//!
//! - One accept task owns the listener; each accepted connection runs in
//!   its own task, reaped through a `JoinSet`.
//! - The ring log sits behind a single exclusive lock ([`Store`]). An
//!   append and the echo that follows it are one critical section, so
//!   records from different connections appear in lock-acquisition order
//!   and no echo ever observes a torn record.
//! - Partial-record bytes live in the per-connection framing buffer and are
//!   discarded when the connection closes without terminating them.
//! - Shutdown is cooperative: a cloneable [`ShutdownSignal`] wakes the
//!   accept loop and every handler, the listener closes, handlers are
//!   joined, and the ring is drained.
//!
//! Two optional collaborators share the store's lock discipline: a mirror
//! file reflecting the logical stream, and a periodic timestamp appender.

mod config;
mod error;
mod handler;
mod mirror;
mod server;
mod shutdown;
mod store;
mod timestamp;

#[cfg(unix)]
pub mod daemon;

pub use config::ServerConfig;
pub use error::{ConnectionError, ServerError};
pub use mirror::MirrorFile;
pub use server::EchoServer;
pub use shutdown::ShutdownSignal;
pub use store::Store;
