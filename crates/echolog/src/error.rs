//! Error types for the server.

use ringlog_codec::FramingError;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Fatal server errors. Anything here invalidates the whole process, not a
/// single connection, and escalates to teardown with a non-zero exit.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Creating or binding the listening socket failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// Underlying socket error.
        source: io::Error,
    },

    /// Switching the bound socket to listening failed.
    #[error("failed to listen on {addr}: {source}")]
    Listen {
        /// Address that could not be listened on.
        addr: SocketAddr,
        /// Underlying socket error.
        source: io::Error,
    },
}

/// Per-connection errors. These end one handler; the accept loop never dies
/// on them.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Reading or framing inbound bytes failed.
    #[error("read failed: {0}")]
    Read(#[source] FramingError),

    /// Writing the echo back failed.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}
