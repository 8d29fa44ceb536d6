//! Periodic timestamp appender.
//!
//! An external appender with no originating connection: it takes the
//! store's lock like any handler, appends, and echoes nothing.

use crate::shutdown::ShutdownSignal;
use crate::store::Store;
use chrono::Local;
use ringlog::Record;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Spawns the appender task. It writes one `timestamp:<rfc2822>` record per
/// interval until shutdown.
pub(crate) fn spawn(store: Store, interval: Duration, shutdown: ShutdownSignal) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // record lands one full interval after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let line = format!("timestamp:{}\n", Local::now().to_rfc2822());
                    match Record::new(line.into_bytes()) {
                        Ok(record) => {
                            debug!(len = record.len(), "appending timestamp record");
                            store.append(record).await;
                        }
                        Err(error) => warn!(%error, "skipping malformed timestamp record"),
                    }
                }
                _ = shutdown.cancelled() => return,
            }
        }
    })
}
