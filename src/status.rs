//! Chain status feed.
//!
//! A long-lived subscription that keeps the UI's displayed status in sync
//! with the backend: a worker thread polls `/status?q=getInfo` on an
//! interval and on explicit refresh requests, pushing each snapshot to the
//! UI over a channel. The UI keeps only the newest value.

use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde_json::Value;
use tokio::runtime::Builder;
use tokio::sync::mpsc as tokio_mpsc;
use tokio::time::MissedTickBehavior;

use crate::api::{ExplorerClient, StatusQuery};

/// One backend status payload, held verbatim with a local receipt stamp.
///
/// The payload shape belongs to the backend; accessors extract display
/// fields best-effort and return None on anything unexpected.
#[derive(Clone, Debug)]
pub struct StatusSnapshot {
    value: Value,
    received_at: DateTime<Local>,
}

impl StatusSnapshot {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            received_at: Local::now(),
        }
    }

    /// The payload exactly as the backend sent it
    pub fn raw(&self) -> &Value {
        &self.value
    }

    pub fn received_at(&self) -> DateTime<Local> {
        self.received_at
    }

    pub fn block_height(&self) -> Option<u64> {
        self.value.get("blocks").and_then(Value::as_u64)
    }

    pub fn best_block_hash(&self) -> Option<&str> {
        self.value.get("lastblockhash").and_then(Value::as_str)
    }

    pub fn difficulty(&self) -> Option<f64> {
        self.value.get("difficulty").and_then(Value::as_f64)
    }

    pub fn mempool_txs(&self) -> Option<u64> {
        self.value.get("mempool_txs").and_then(Value::as_u64)
    }
}

enum FeedCommand {
    Refresh,
}

/// Handle to the status subscription worker.
///
/// Dropping the feed closes the command channel; the worker observes the
/// closure and exits, so teardown of the owning UI cancels the
/// subscription.
pub struct StatusFeed {
    commands: tokio_mpsc::UnboundedSender<FeedCommand>,
    snapshots: std_mpsc::Receiver<StatusSnapshot>,
}

impl StatusFeed {
    /// Start the subscription worker. The interval's first fetch fires
    /// immediately on spawn.
    pub fn spawn(client: ExplorerClient, poll_interval: Duration) -> Self {
        let (command_tx, command_rx) = tokio_mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = std_mpsc::channel();

        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::error!("Failed to create async runtime for status feed: {}", e);
                    return;
                }
            };
            runtime.block_on(run_feed(client, poll_interval, command_rx, snapshot_tx));
        });

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
        }
    }

    /// Ask the worker for one immediate emission. The subscription channel
    /// stays the single source of displayed values; this only makes the
    /// next one arrive promptly.
    pub fn refresh_now(&self) {
        let _ = self.commands.send(FeedCommand::Refresh);
    }

    /// Newest snapshot delivered since the last call, if any. Older
    /// undrained snapshots are discarded: last write wins.
    pub fn try_latest(&self) -> Option<StatusSnapshot> {
        self.snapshots.try_iter().last()
    }
}

async fn run_feed(
    client: ExplorerClient,
    poll_interval: Duration,
    mut commands: tokio_mpsc::UnboundedReceiver<FeedCommand>,
    snapshots: std_mpsc::Sender<StatusSnapshot>,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(FeedCommand::Refresh) => {
                    if !fetch_and_push(&client, &snapshots).await {
                        break;
                    }
                }
                // UI side dropped the feed
                None => break,
            },
            _ = ticker.tick() => {
                if !fetch_and_push(&client, &snapshots).await {
                    break;
                }
            }
        }
    }
}

/// Returns false once the UI side is gone and the worker should stop.
async fn fetch_and_push(
    client: &ExplorerClient,
    snapshots: &std_mpsc::Sender<StatusSnapshot>,
) -> bool {
    match client.get_status(StatusQuery::Info).await {
        Ok(value) => snapshots.send(StatusSnapshot::new(value)).is_ok(),
        Err(e) => {
            // Keep showing the previous snapshot rather than adopting a
            // failed fetch
            tracing::warn!("status refresh failed: {}", e);
            true
        }
    }
}
