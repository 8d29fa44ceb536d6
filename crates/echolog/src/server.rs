//! Accept loop, handler lifecycle, and teardown.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handler::Connection;
use crate::mirror::MirrorFile;
use crate::shutdown::ShutdownSignal;
use crate::store::Store;
use crate::timestamp;
use ringlog::RingLog;
use ringlog_codec::LineDecoder;
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpSocket};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// The TCP server that owns the shared ring log.
///
/// Constructed with [`bind`], driven with [`run`]. A cloneable
/// [`ShutdownSignal`] (from [`shutdown_signal`]) requests graceful
/// termination; SIGINT/SIGTERM wiring is the binary's job.
///
/// [`bind`]: EchoServer::bind
/// [`run`]: EchoServer::run
/// [`shutdown_signal`]: EchoServer::shutdown_signal
pub struct EchoServer {
    listener: TcpListener,
    store: Store,
    shutdown: ShutdownSignal,
    config: ServerConfig,
}

impl EchoServer {
    /// Opens the listening socket (address reuse on, configured backlog)
    /// and initializes an empty ring log.
    ///
    /// Bind and listen failures are server-fatal: nothing useful can run
    /// without the listener.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let addr = SocketAddr::new(config.bind_addr, config.port);
        let listener = open_listener(addr, config.backlog)?;
        info!(addr = %listener.local_addr().unwrap_or(addr), "listening");

        let mirror = config.mirror_path.clone().map(MirrorFile::new);
        let store = Store::new(RingLog::new(), mirror, config.echo_chunk);

        Ok(Self {
            listener,
            store,
            shutdown: ShutdownSignal::new(),
            config,
        })
    }

    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Returns a signal that triggers graceful shutdown of this server.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Returns a handle to the shared store.
    pub fn store(&self) -> Store {
        self.store.clone()
    }

    /// Runs the accept loop until shutdown, then tears down: closes the
    /// listener, joins every handler, removes the mirror file, and drains
    /// the ring.
    pub async fn run(self) -> Result<(), ServerError> {
        let Self {
            listener,
            store,
            shutdown,
            config,
        } = self;

        let mut handlers: JoinSet<SocketAddr> = JoinSet::new();

        let timestamp_task = config
            .timestamp_interval
            .map(|interval| timestamp::spawn(store.clone(), interval, shutdown.clone()));

        let decoder = match config.max_record_len {
            Some(max) => LineDecoder::with_max_length(max),
            None => LineDecoder::new(),
        };

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!(%peer, "accepted connection");
                        let connection = Connection::new(
                            stream,
                            peer,
                            store.clone(),
                            shutdown.clone(),
                            decoder,
                            config.poll_interval,
                        );
                        handlers.spawn(connection.run());
                    }
                    // A single failed accept is not fatal; log and keep
                    // serving.
                    Err(error) => warn!(%error, "accept failed"),
                },
                Some(finished) = handlers.join_next(), if !handlers.is_empty() => {
                    reap(finished);
                },
                _ = shutdown.cancelled() => break,
            }
        }

        // The owning listener reference closes here, before handlers are
        // joined, so no new connection can arrive mid-teardown.
        drop(listener);

        while let Some(finished) = handlers.join_next().await {
            reap(finished);
        }
        if let Some(task) = timestamp_task {
            if let Err(error) = task.await {
                warn!(%error, "timestamp appender panicked");
            }
        }

        store.remove_mirror().await;
        let drained = store.drain().await;
        info!(drained, "released stored records, exiting");
        Ok(())
    }
}

fn open_listener(addr: SocketAddr, backlog: u32) -> Result<TcpListener, ServerError> {
    let bind_err = |source| ServerError::Bind { addr, source };

    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4(),
        SocketAddr::V6(_) => TcpSocket::new_v6(),
    }
    .map_err(bind_err)?;
    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(addr).map_err(bind_err)?;
    socket
        .listen(backlog)
        .map_err(|source| ServerError::Listen { addr, source })
}

fn reap(finished: Result<SocketAddr, JoinError>) {
    match finished {
        Ok(peer) => debug!(%peer, "reaped connection handler"),
        Err(error) => warn!(%error, "connection handler panicked"),
    }
}
