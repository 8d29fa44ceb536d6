//! Demo traffic generator for the echo-log server.
//!
//! Connects, sends newline-terminated lines at a configurable pace, and
//! prints everything the server echoes back.
//!
//! ```bash
//! linegen --addr 127.0.0.1:9000 -n 20 --delay-ms 250
//! ```

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[derive(Debug, Parser)]
#[command(name = "linegen", version, about = "Send lines to an echo-log server and print the echoes")]
struct Args {
    /// Server address.
    #[arg(long, default_value = "127.0.0.1:9000")]
    addr: String,

    /// Number of lines to send.
    #[arg(short = 'n', long, default_value_t = 20)]
    count: usize,

    /// Delay between lines in milliseconds.
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let stream = TcpStream::connect(&args.addr)
        .await
        .with_context(|| format!("failed to connect to {}", args.addr))?;
    let (mut read_half, mut write_half) = stream.into_split();

    let reader = tokio::spawn(async move {
        let mut total = 0usize;
        let mut buf = vec![0u8; 4096];
        loop {
            match read_half.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    total += n;
                    print!("{}", String::from_utf8_lossy(&buf[..n]));
                }
            }
        }
        total
    });

    let mut rng = rand::thread_rng();
    for i in 0..args.count {
        let line = format!("line-{i}-{:08x}\n", rng.gen::<u32>());
        write_half.write_all(line.as_bytes()).await?;
        tokio::time::sleep(Duration::from_millis(args.delay_ms)).await;
    }

    // Half-close: the server sees EOF and finishes echoing what's in
    // flight before closing its side.
    drop(write_half);
    let echoed = reader.await.context("reader task failed")?;
    println!("\nechoed {echoed} bytes total");
    Ok(())
}
