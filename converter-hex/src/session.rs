//! Conversion Session
//!
//! Holds the pending input, the currency pair and the recorded history.
//! The pair is locked while any history exists; clearing the history is the
//! only way to unlock it.

use converter_types::{
    Amount, ConversionRecord, ConversionRequest, ConvertError, CurrencyCode, HistoryStore, Notice,
    RateFetcher,
};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::notify::Notifier;
use crate::writer::{HistoryWriter, PendingDelete};

/// Whether the currency pair may be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No history; the pair is editable.
    Unlocked,
    /// At least one recorded conversion; the pair is fixed.
    Locked,
}

/// One converter session, alive for the whole process.
///
/// Generic over `F: RateFetcher` so tests can inject a fixed-rate source.
pub struct ConversionSession<F: RateFetcher> {
    fetcher: F,
    writer: HistoryWriter,
    notifier: Notifier,
    pending_amount: String,
    from_currency: CurrencyCode,
    to_currency: CurrencyCode,
    history: Vec<ConversionRecord>,
    last_result: Option<Amount>,
    loading: watch::Sender<bool>,
}

impl<F: RateFetcher> ConversionSession<F> {
    /// Opens a session, hydrating history from `store`.
    ///
    /// A failed load starts the session empty; it is logged and reported as a
    /// notice, never returned. When history exists, the pair is restored from
    /// the most recent record.
    pub async fn open<S: HistoryStore>(fetcher: F, store: S, notifier: Notifier) -> Self {
        let history = match store.load().await {
            Ok(Some(history)) => history,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load history, starting empty: {}", e);
                notifier.emit(Notice::load_failed(&e));
                Vec::new()
            }
        };

        let (from_currency, to_currency) = history
            .last()
            .map(|r| (r.from_currency, r.to_currency))
            .unwrap_or((CurrencyCode::DEFAULT_FROM, CurrencyCode::DEFAULT_TO));

        info!(entries = history.len(), "Session opened");

        Self {
            fetcher,
            writer: HistoryWriter::spawn(store, notifier.clone()),
            notifier,
            pending_amount: String::new(),
            from_currency,
            to_currency,
            history,
            last_result: None,
            loading: watch::channel(false).0,
        }
    }

    /// Returns a reference to the underlying rate fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores the raw amount text. Validation happens on `convert`.
    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.pending_amount = text.into();
    }

    /// Changes the base currency. Ignored while locked.
    pub fn set_from_currency(&mut self, code: CurrencyCode) {
        if self.is_locked() {
            debug!(requested = %code, "Pair locked; from-currency unchanged");
            return;
        }
        self.from_currency = code;
    }

    /// Changes the target currency. Ignored while locked.
    pub fn set_to_currency(&mut self, code: CurrencyCode) {
        if self.is_locked() {
            debug!(requested = %code, "Pair locked; to-currency unchanged");
            return;
        }
        self.to_currency = code;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts the pending amount and records the result.
    ///
    /// On success the record is appended, the pair locks, the pending amount
    /// is cleared and a save is queued. On failure nothing changes.
    #[instrument(skip(self), fields(from = %self.from_currency, to = %self.to_currency))]
    pub async fn convert(&mut self) -> Result<ConversionRecord, ConvertError> {
        let request =
            ConversionRequest::new(&self.pending_amount, self.from_currency, self.to_currency)
                .map_err(|e| self.reject(e))?;

        let rate = {
            let _loading = LoadingGuard::engage(&self.loading);
            self.fetcher
                .fetch_rate(request.from_currency(), request.to_currency())
                .await
        };
        let rate = rate.map_err(|e| self.reject(e.into()))?;
        let record = request.complete(rate).map_err(|e| self.reject(e))?;

        self.history.push(record.clone());
        self.last_result = Some(record.result);
        self.pending_amount.clear();
        self.writer.save(self.history.clone());

        info!(result = %record.result, entries = self.history.len(), "Conversion recorded");
        self.notifier.emit(Notice::converted(&record));
        Ok(record)
    }

    /// Empties the history and unlocks the pair.
    ///
    /// The in-memory reset always happens. The stored history is deleted in
    /// the background; await the returned handle to learn whether that worked.
    #[instrument(skip(self))]
    pub fn clear_history(&mut self) -> PendingDelete {
        self.history.clear();
        self.pending_amount.clear();
        self.last_result = None;
        self.from_currency = CurrencyCode::DEFAULT_FROM;
        self.to_currency = CurrencyCode::DEFAULT_TO;

        info!("History cleared");
        self.notifier.emit(Notice::history_cleared());
        self.writer.delete()
    }

    /// Waits until all queued history writes have been applied.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn reject(&self, err: ConvertError) -> ConvertError {
        warn!("Conversion rejected: {}", err);
        self.notifier.emit(Notice::convert_failed(&err));
        err
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        if self.history.is_empty() {
            SessionState::Unlocked
        } else {
            SessionState::Locked
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == SessionState::Locked
    }

    /// True while a rate fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Subscribes to the loading flag.
    ///
    /// The receiver observes the flag while `convert` holds the session, so a
    /// presentation layer can show progress and refuse repeat requests.
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn pending_amount(&self) -> &str {
        &self.pending_amount
    }

    pub fn from_currency(&self) -> CurrencyCode {
        self.from_currency
    }

    pub fn to_currency(&self) -> CurrencyCode {
        self.to_currency
    }

    pub fn history(&self) -> &[ConversionRecord] {
        &self.history
    }

    /// Result of the most recent conversion in this process, if any.
    pub fn last_result(&self) -> Option<Amount> {
        self.last_result
    }

    /// Sum of all recorded results, labelled with the current target currency.
    pub fn total(&self) -> Amount {
        self.history.iter().map(|r| &r.result).sum()
    }
}

/// Raises the loading flag and lowers it again when dropped, including when
/// the conversion future is dropped mid-fetch.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
