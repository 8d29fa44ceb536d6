//! The single shared ring log and its lock discipline.

use crate::mirror::MirrorFile;
use ringlog::{Record, RingLog};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Shared handle to the server's ring log.
///
/// Every mutator and every read-back traversal runs under one exclusive
/// lock. An append and the echo that follows it are a single critical
/// section: no other append can slip between a record and its echo, which
/// is what makes the echo "the store's state immediately after my append"
/// and keeps records untorn in every read-back.
#[derive(Debug, Clone)]
pub struct Store {
    log: Arc<Mutex<RingLog>>,
    mirror: Option<Arc<MirrorFile>>,
    echo_chunk: usize,
}

impl Store {
    /// Wraps a log, an optional mirror, and the echo chunk size.
    pub fn new(log: RingLog, mirror: Option<MirrorFile>, echo_chunk: usize) -> Self {
        Self {
            log: Arc::new(Mutex::new(log)),
            mirror: mirror.map(Arc::new),
            echo_chunk,
        }
    }

    /// Appends a record with no echo. Used by appenders that have no
    /// originating connection, like the periodic timestamp writer.
    pub async fn append(&self, record: Record) {
        let mut log = self.log.lock().await;
        if let Some(evicted) = log.append(record) {
            debug!(evicted_len = evicted.len(), "evicted oldest record");
        }
        self.sync_mirror(&log).await;
    }

    /// Appends a record, then streams the log's entire logical contents
    /// into `sink`, all under one lock acquisition.
    ///
    /// Short writes are absorbed by `write_all`; the echo either lands in
    /// full or fails with the error that stopped it.
    pub async fn append_and_echo<W>(&self, record: Record, sink: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let mut log = self.log.lock().await;
        if let Some(evicted) = log.append(record) {
            debug!(evicted_len = evicted.len(), "evicted oldest record");
        }
        self.sync_mirror(&log).await;

        let size = log.logical_size();
        let mut pos = 0u64;
        while pos < size {
            let chunk = log.read_at(pos, self.echo_chunk);
            if chunk.is_empty() {
                break;
            }
            sink.write_all(chunk).await?;
            pos += chunk.len() as u64;
        }
        sink.flush().await
    }

    /// Releases every stored record. Used at teardown.
    pub async fn drain(&self) -> usize {
        self.log.lock().await.drain()
    }

    /// Removes the mirror file, if one is configured. Used at teardown.
    pub async fn remove_mirror(&self) {
        if let Some(mirror) = &self.mirror {
            if let Err(error) = mirror.remove().await {
                warn!(%error, path = %mirror.path().display(), "failed to remove mirror file");
            }
        }
    }

    /// Total byte count of the stored records.
    pub async fn logical_size(&self) -> u64 {
        self.log.lock().await.logical_size()
    }

    /// Copies out the stored records in insertion order.
    pub async fn snapshot(&self) -> Vec<Vec<u8>> {
        let log = self.log.lock().await;
        log.records().map(|r| r.as_bytes().to_vec()).collect()
    }

    /// Mirror failures are advisory: the in-memory ring stays canonical,
    /// so a failed sync is logged and service continues.
    async fn sync_mirror(&self, log: &RingLog) {
        if let Some(mirror) = &self.mirror {
            if let Err(error) = mirror.sync(log).await {
                warn!(%error, path = %mirror.path().display(), "failed to sync mirror file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::new(RingLog::new(), None, 1024)
    }

    fn line(s: &str) -> Record {
        Record::from_line(s).unwrap()
    }

    #[tokio::test]
    async fn test_append_and_echo_streams_whole_log() {
        let store = store();
        let mut sink = Vec::new();

        store.append_and_echo(line("hello"), &mut sink).await.unwrap();
        assert_eq!(sink, b"hello\n");

        sink.clear();
        store.append_and_echo(line("world"), &mut sink).await.unwrap();
        assert_eq!(sink, b"hello\nworld\n");
    }

    #[tokio::test]
    async fn test_echo_respects_small_chunks() {
        let store = Store::new(RingLog::new(), None, 3);
        let mut sink = Vec::new();

        store.append_and_echo(line("abcdefgh"), &mut sink).await.unwrap();
        assert_eq!(sink, b"abcdefgh\n");
    }

    #[tokio::test]
    async fn test_drain_empties_store() {
        let store = store();
        store.append(line("a")).await;
        store.append(line("b")).await;

        assert_eq!(store.drain().await, 2);
        assert_eq!(store.logical_size().await, 0);
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_orders_oldest_first() {
        let store = store();
        for i in 0..12 {
            store.append(line(&format!("r{i}"))).await;
        }

        let records = store.snapshot().await;
        assert_eq!(records.len(), 10);
        assert_eq!(records[0], b"r2\n");
        assert_eq!(records[9], b"r11\n");
    }
}
