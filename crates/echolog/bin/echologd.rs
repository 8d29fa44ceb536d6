//! Bounded echo-log server daemon.
//!
//! Listens for TCP clients, reassembles newline-terminated records across
//! packet boundaries, appends each to a fixed-capacity ring log, and echoes
//! the log's full contents back after every append.
//!
//! ```bash
//! # Foreground on the default port
//! echologd
//!
//! # Background daemon on port 9100 with a mirror file
//! echologd -d -p 9100 --mirror /tmp/echolog
//!
//! # Verbose logging
//! RUST_LOG=debug echologd
//! ```

use anyhow::Context;
use clap::Parser;
use echolog::{EchoServer, ServerConfig, ShutdownSignal};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "echologd", version, about = "Line-reassembly echo server over a bounded ring log")]
struct Args {
    /// TCP port to listen on.
    #[arg(short = 'p', long, default_value_t = 9000)]
    port: u16,

    /// Detach from the terminal and run in the background.
    #[arg(short = 'd', long)]
    daemon: bool,

    /// Mirror the log contents to this file (removed on clean shutdown).
    #[arg(long, value_name = "PATH")]
    mirror: Option<PathBuf>,

    /// Append a timestamp record every SECS seconds.
    #[arg(long, value_name = "SECS")]
    timestamp_interval: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if args.daemon {
        #[cfg(unix)]
        echolog::daemon::daemonize().context("failed to daemonize")?;
        #[cfg(not(unix))]
        anyhow::bail!("daemon mode is only supported on unix");
    }

    // The runtime is built after the daemonize fork; forking with live
    // runtime threads would strand them.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;
    runtime.block_on(serve(args))
}

async fn serve(args: Args) -> anyhow::Result<()> {
    let mut config = ServerConfig::default().with_port(args.port);
    if let Some(path) = args.mirror {
        config = config.with_mirror_path(path);
    }
    if let Some(secs) = args.timestamp_interval {
        config = config.with_timestamp_interval(Duration::from_secs(secs));
    }

    let server = EchoServer::bind(config)
        .await
        .context("failed to start server")?;

    tokio::spawn(shutdown_on_signal(server.shutdown_signal()));

    server.run().await.context("server failed")?;
    Ok(())
}

async fn shutdown_on_signal(signal: ShutdownSignal) {
    match wait_for_signal().await {
        Ok(name) => info!(signal = name, "caught signal, shutting down"),
        Err(error) => error!(%error, "signal handler failed, shutting down"),
    }
    signal.shutdown();
}

#[cfg(unix)]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = interrupt.recv() => Ok("SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}
