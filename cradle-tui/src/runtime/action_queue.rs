use crate::app::{CellKey, TableKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Action {
    /// A settled cell edit is ready to dispatch to storage.
    FlushSave { key: CellKey },
    /// Re-fetch one table from storage and replace the displayed list.
    RefreshTable { table: TableKind },
    SubmitNewFeeding,
    SubmitNewSleep,
    ConfirmDelete,
}

pub(crate) type ActionTx = UnboundedSender<Action>;
pub(crate) type ActionRx = UnboundedReceiver<Action>;

pub(crate) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
