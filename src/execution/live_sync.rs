use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::types::EquipmentRecord;

/// Refresh period used by [`LiveSync::default`].
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(5);

const MIN_SYNC_INTERVAL: Duration = Duration::from_millis(1);

/// Periodically republishes a record snapshot to a consumer (e.g. a dashboard refresh loop).
///
/// Each [`LiveSync::start`] call spawns its own background thread; nothing is shared between
/// runs. Stop a run with [`LiveSyncHandle::stop`], by dropping the handle, or by dropping the
/// receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSync {
    interval: Duration,
}

impl Default for LiveSync {
    fn default() -> Self {
        Self::new(DEFAULT_SYNC_INTERVAL)
    }
}

impl LiveSync {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_SYNC_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start publishing `records` once per interval.
    ///
    /// The first snapshot arrives after one interval.
    pub fn start(&self, records: Vec<EquipmentRecord>) -> (Receiver<Vec<EquipmentRecord>>, LiveSyncHandle) {
        let (tx, rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = self.interval;

        let thread = thread::spawn(move || sync_loop(interval, records, tx, stop_rx));

        let handle = LiveSyncHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        };
        (rx, handle)
    }
}

fn sync_loop(
    interval: Duration,
    records: Vec<EquipmentRecord>,
    tx: Sender<Vec<EquipmentRecord>>,
    stop_rx: Receiver<()>,
) {
    debug!(interval_ms = interval.as_millis() as u64, records = records.len(), "live sync started");
    loop {
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if tx.send(records.clone()).is_err() {
                    break;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("live sync stopped");
}

/// Owner of a running [`LiveSync`] thread.
#[derive(Debug)]
pub struct LiveSyncHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl LiveSyncHandle {
    /// Whether the background thread is still publishing.
    pub fn is_active(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop publishing and wait for the background thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender wakes the loop with `Disconnected`.
        drop(self.stop_tx.take());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for LiveSyncHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
