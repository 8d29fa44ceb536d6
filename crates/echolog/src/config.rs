//! Configuration for server behavior.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for an [`crate::EchoServer`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind. Default: all interfaces.
    pub bind_addr: IpAddr,

    /// TCP port to listen on. Default: 9000. Port 0 asks the OS for an
    /// ephemeral port (useful in tests).
    pub port: u16,

    /// Listen backlog. Default: 10.
    pub backlog: u32,

    /// Largest slice handed to the socket per echo write. Default: 1024.
    pub echo_chunk: usize,

    /// How often idle handlers re-check the shutdown flag. Bounds shutdown
    /// latency for connections with no traffic. Default: 100ms.
    pub poll_interval: Duration,

    /// Maximum accepted record length, terminator included. Longer frames
    /// are discarded whole. Default: unlimited.
    pub max_record_len: Option<usize>,

    /// When set, the full logical stream is mirrored to this file after
    /// each append and the file is removed on clean shutdown.
    pub mirror_path: Option<PathBuf>,

    /// When set, a `timestamp:<rfc2822>` record is appended at this
    /// interval under the same lock discipline as client records.
    pub timestamp_interval: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 9000,
            backlog: 10,
            echo_chunk: 1024,
            poll_interval: Duration::from_millis(100),
            max_record_len: None,
            mirror_path: None,
            timestamp_interval: None,
        }
    }
}

impl ServerConfig {
    /// Sets the bind address.
    pub fn with_bind_addr(mut self, addr: IpAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the listen port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the listen backlog.
    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    /// Sets the echo write chunk size.
    pub fn with_echo_chunk(mut self, echo_chunk: usize) -> Self {
        self.echo_chunk = echo_chunk;
        self
    }

    /// Sets the shutdown re-check interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the maximum accepted record length.
    pub fn with_max_record_len(mut self, max: usize) -> Self {
        self.max_record_len = Some(max);
        self
    }

    /// Enables the mirror file at `path`.
    pub fn with_mirror_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.mirror_path = Some(path.into());
        self
    }

    /// Enables the periodic timestamp appender.
    pub fn with_timestamp_interval(mut self, interval: Duration) -> Self {
        self.timestamp_interval = Some(interval);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 9000);
        assert_eq!(config.backlog, 10);
        assert_eq!(config.echo_chunk, 1024);
        assert!(config.mirror_path.is_none());
        assert!(config.timestamp_interval.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let config = ServerConfig::default()
            .with_port(0)
            .with_backlog(32)
            .with_poll_interval(Duration::from_millis(10))
            .with_max_record_len(4096)
            .with_mirror_path("/tmp/echolog-test")
            .with_timestamp_interval(Duration::from_secs(10));

        assert_eq!(config.port, 0);
        assert_eq!(config.backlog, 32);
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.max_record_len, Some(4096));
        assert_eq!(config.mirror_path.as_deref(), Some(std::path::Path::new("/tmp/echolog-test")));
        assert_eq!(config.timestamp_interval, Some(Duration::from_secs(10)));
    }
}
