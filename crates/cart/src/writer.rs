//! Background persistence for the cart.
//!
//! One task per [`crate::CartStore`] owns every write to the key-value
//! store. Mutators publish the freshly serialized list through a `watch`
//! channel and return immediately; the task always writes the newest value
//! it has not seen yet, so a burst of taps collapses into a single write.
//!
//! Each published snapshot carries a generation number. After attempting a
//! write the task reports that generation as settled, which is what
//! [`Writer::flush`] waits on.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, instrument};

use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Default)]
struct Snapshot {
    generation: u64,
    json: Option<Arc<str>>,
}

/// Handle to the background writer task.
///
/// Dropping the handle lets the task write any pending snapshot and exit.
#[derive(Debug)]
pub(crate) struct Writer {
    snapshots: watch::Sender<Snapshot>,
    settled: watch::Receiver<u64>,
}

impl Writer {
    /// Spawn the writer task for `key` on the current tokio runtime.
    pub(crate) fn spawn<S: KeyValueStore>(store: S, key: String) -> Self {
        let (snapshots, snapshot_rx) = watch::channel(Snapshot::default());
        let (settled_tx, settled) = watch::channel(0);
        tokio::spawn(run(store, key, snapshot_rx, settled_tx));
        Self { snapshots, settled }
    }

    /// Queue `json` as the latest value to persist.
    pub(crate) fn publish(&self, json: String) {
        self.snapshots.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.json = Some(json.into());
        });
    }

    /// Wait until every snapshot published so far has been written or has
    /// failed to write.
    pub(crate) async fn flush(&self) {
        let target = self.snapshots.borrow().generation;
        let mut settled = self.settled.clone();
        // An Err means the task is gone; nothing is left to wait for.
        let _ = settled.wait_for(|done| *done >= target).await;
    }
}

#[instrument(skip_all, fields(key = %key))]
async fn run<S: KeyValueStore>(
    store: S,
    key: String,
    mut snapshots: watch::Receiver<Snapshot>,
    settled: watch::Sender<u64>,
) {
    debug!("Cart writer started");
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        let Some(json) = snapshot.json else {
            continue;
        };

        match store.set(&key, json.to_string()).await {
            Ok(()) => debug!(generation = snapshot.generation, "Persisted cart"),
            Err(e) => error!(
                error = %e,
                generation = snapshot.generation,
                "Failed to persist cart"
            ),
        }
        settled.send_replace(snapshot.generation);
    }
    debug!("Cart writer stopped");
}
