use crate::app::{App, View};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::action_queue::{Action, ActionTx};

mod confirm_delete;
mod feedings;
mod new_feeding;
mod new_sleep;
mod sleep;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match app.current_view {
        View::Feedings => feedings::handle_feedings_key(key, app, action_tx),
        View::Sleep => sleep::handle_sleep_key(key, app, action_tx),
        View::NewFeeding => new_feeding::handle_new_feeding_key(key, app, action_tx),
        View::NewSleep => new_sleep::handle_new_sleep_key(key, app, action_tx),
        View::ConfirmDelete => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
    }
}

/// Pointer handling for the two tables. A press inside a table activates
/// the cell under it; a press outside the table's bounding region runs the
/// table's exit processing (commit for feedings, discard for sleep).
pub(super) fn handle_mouse(mouse: MouseEvent, app: &mut App, action_tx: &ActionTx) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    match app.current_view {
        View::Feedings => {
            feedings::handle_feedings_click(mouse.column, mouse.row, app, action_tx)
        }
        View::Sleep => sleep::handle_sleep_click(mouse.column, mouse.row, app, action_tx),
        _ => {}
    }
}
