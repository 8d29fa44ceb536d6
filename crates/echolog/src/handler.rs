//! Per-connection handler: reassemble records, append, echo.

use crate::error::ConnectionError;
use crate::shutdown::ShutdownSignal;
use crate::store::Store;
use ringlog_codec::LineDecoder;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_stream::StreamExt;
use tokio_util::codec::FramedRead;
use tracing::{debug, info, warn};

/// One accepted connection and everything its handler task needs.
///
/// The framing buffer inside `FramedRead` is this connection's private
/// partial-record state: bytes that arrive without a terminating newline
/// wait there and die with the connection.
pub(crate) struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    store: Store,
    shutdown: ShutdownSignal,
    decoder: LineDecoder,
    poll_interval: Duration,
}

impl Connection {
    pub(crate) fn new(
        stream: TcpStream,
        peer: SocketAddr,
        store: Store,
        shutdown: ShutdownSignal,
        decoder: LineDecoder,
        poll_interval: Duration,
    ) -> Self {
        Self {
            stream,
            peer,
            store,
            shutdown,
            decoder,
            poll_interval,
        }
    }

    /// Runs the handler to completion. Failures are isolated here: they end
    /// this connection and never escalate past it.
    pub(crate) async fn run(self) -> SocketAddr {
        let peer = self.peer;
        match self.serve().await {
            Ok(()) => info!(%peer, "closed connection"),
            Err(error) => warn!(%peer, %error, "connection failed"),
        }
        peer
    }

    async fn serve(self) -> Result<(), ConnectionError> {
        let Self {
            stream,
            peer,
            store,
            shutdown,
            decoder,
            poll_interval,
        } = self;

        let (read_half, mut write_half) = stream.into_split();
        let mut frames = FramedRead::new(read_half, decoder);

        loop {
            tokio::select! {
                frame = frames.next() => match frame {
                    Some(Ok(record)) => {
                        debug!(%peer, len = record.len(), "completed record");
                        store.append_and_echo(record, &mut write_half).await?;
                    }
                    Some(Err(error)) => return Err(ConnectionError::Read(error)),
                    // EOF: unterminated bytes in the framing buffer are
                    // dropped with it.
                    None => return Ok(()),
                },
                _ = shutdown.cancelled() => return Ok(()),
                // Safety net: bounds how long a silent connection can go
                // without re-checking the shutdown flag.
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
    }
}
