use std::collections::HashMap;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::app::CellKey;
use crate::runtime::{Action, ActionTx};

/// A cell edit waiting out its settle delay. The timer is an abortable task;
/// a superseding edit aborts it before it fires.
#[derive(Debug)]
struct PendingSave {
    value: String,
    timer: Option<JoinHandle<()>>,
}

/// Holds at most one pending save per (record, field). Scheduling a second
/// save for the same cell cancels the first, so only the latest value is
/// ever dispatched. Different cells settle independently.
#[derive(Debug, Default)]
pub struct SaveQueue {
    pending: HashMap<CellKey, PendingSave>,
}

impl SaveQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `value` for dispatch after `delay`. A zero delay flushes on
    /// the current event-loop pass.
    pub(crate) fn schedule(&mut self, key: CellKey, value: String, delay: Duration, tx: &ActionTx) {
        if let Some(previous) = self.pending.remove(&key) {
            if let Some(timer) = previous.timer {
                timer.abort();
            }
        }

        if delay.is_zero() {
            self.pending.insert(key, PendingSave { value, timer: None });
            let _ = tx.send(Action::FlushSave { key });
            return;
        }

        let tx = tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::FlushSave { key });
        });
        self.pending.insert(
            key,
            PendingSave {
                value,
                timer: Some(timer),
            },
        );
    }

    /// Abort and drop the pending save for a cell. A cancelled save never
    /// dispatches.
    pub fn cancel(&mut self, key: &CellKey) {
        if let Some(pending) = self.pending.remove(key) {
            if let Some(timer) = pending.timer {
                timer.abort();
            }
        }
    }

    /// Claim the settled value for dispatch. Returns None when the save was
    /// cancelled or superseded after its timer fired.
    pub fn take(&mut self, key: &CellKey) -> Option<String> {
        self.pending.remove(key).map(|pending| {
            if let Some(timer) = pending.timer {
                timer.abort();
            }
            pending.value
        })
    }

    pub fn has_pending(&self, key: &CellKey) -> bool {
        self.pending.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{CellField, FeedingField};
    use crate::runtime::channel;

    fn key() -> CellKey {
        (7, CellField::Feeding(FeedingField::Duration))
    }

    #[tokio::test(start_paused = true)]
    async fn superseding_edit_cancels_the_first_timer() {
        let (tx, mut rx) = channel();
        let mut queue = SaveQueue::new();

        queue.schedule(key(), "30".to_string(), Duration::from_millis(500), &tx);
        // Let the just-spawned timer task run its first poll so its sleep
        // deadline is armed against the (paused) clock before we advance it.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(200)).await;
        queue.schedule(key(), "45".to_string(), Duration::from_millis(500), &tx);
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;

        // Only the superseding timer fired, and it carries the second value.
        assert_eq!(rx.try_recv().ok(), Some(Action::FlushSave { key: key() }));
        assert!(rx.try_recv().is_err());
        assert_eq!(queue.take(&key()), Some("45".to_string()));
    }

    #[tokio::test]
    async fn zero_delay_flushes_immediately() {
        let (tx, mut rx) = channel();
        let mut queue = SaveQueue::new();

        queue.schedule(key(), "45".to_string(), Duration::ZERO, &tx);

        assert_eq!(rx.try_recv().ok(), Some(Action::FlushSave { key: key() }));
        assert_eq!(queue.take(&key()), Some("45".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_save_never_dispatches() {
        let (tx, mut rx) = channel();
        let mut queue = SaveQueue::new();

        queue.schedule(key(), "30".to_string(), Duration::from_millis(500), &tx);
        queue.cancel(&key());

        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;

        assert!(rx.try_recv().is_err());
        assert_eq!(queue.take(&key()), None);
    }
}
