//! History write queue.
//!
//! Persistence requests are queued and applied in order by one background
//! task that owns the store. Callers never wait for a save; a deletion hands
//! back a [`PendingDelete`] that resolves with its outcome, and [`flush`]
//! resolves once everything queued before it has been applied.
//!
//! [`flush`]: HistoryWriter::flush

use converter_types::{ConversionRecord, HistoryStore, Notice, StorageError};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::notify::Notifier;

enum WriteOp {
    Save(Vec<ConversionRecord>),
    Delete(oneshot::Sender<Result<(), StorageError>>),
    Flush(oneshot::Sender<()>),
}

/// Handle to the write queue.
///
/// Dropping the handle lets the task drain what is queued and then stop.
pub struct HistoryWriter {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl HistoryWriter {
    /// Spawns the writer task on the current Tokio runtime.
    pub fn spawn<S: HistoryStore>(store: S, notifier: Notifier) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, rx, notifier));
        Self { tx }
    }

    /// Queues a save of the full history. Failures are logged only.
    pub fn save(&self, history: Vec<ConversionRecord>) {
        if self.tx.send(WriteOp::Save(history)).is_err() {
            warn!("History writer stopped; save dropped");
        }
    }

    /// Queues a deletion of the stored history.
    pub fn delete(&self) -> PendingDelete {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(WriteOp::Delete(reply)).is_err() {
            warn!("History writer stopped; delete dropped");
        }
        PendingDelete { rx }
    }

    /// Waits until every write queued before this call has been applied.
    pub async fn flush(&self) {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(WriteOp::Flush(reply)).is_ok() {
            let _ = rx.await;
        }
    }
}

/// Outcome of a queued deletion.
pub struct PendingDelete {
    rx: oneshot::Receiver<Result<(), StorageError>>,
}

impl PendingDelete {
    pub async fn outcome(self) -> Result<(), StorageError> {
        self.rx
            .await
            .unwrap_or_else(|_| Err(StorageError::Unavailable("history writer stopped".into())))
    }
}

#[instrument(skip_all)]
async fn run<S: HistoryStore>(
    store: S,
    mut rx: mpsc::UnboundedReceiver<WriteOp>,
    notifier: Notifier,
) {
    debug!("History writer started");
    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Save(history) => match store.save(&history).await {
                Ok(()) => debug!(entries = history.len(), "History saved"),
                Err(e) => warn!("Failed to save history: {}", e),
            },
            WriteOp::Delete(reply) => {
                let result = store.delete().await;
                match &result {
                    Ok(()) => info!("Stored history deleted"),
                    Err(e) => {
                        warn!("Failed to delete stored history: {}", e);
                        notifier.emit(Notice::delete_failed(e));
                    }
                }
                let _ = reply.send(result);
            }
            WriteOp::Flush(reply) => {
                let _ = reply.send(());
            }
        }
    }
    debug!("History writer stopped");
}
