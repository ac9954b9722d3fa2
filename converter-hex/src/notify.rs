//! Notice delivery.

use converter_types::Notice;
use tokio::sync::mpsc;

/// Sends notices to whoever renders them.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    /// Creates a notifier and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, notice: Notice) {
        // A closed receiver means nobody renders notices any more.
        let _ = self.tx.send(notice);
    }
}
