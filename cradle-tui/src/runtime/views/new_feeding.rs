use crate::app::{App, NewFeedingField, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_new_feeding_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = &mut app.new_feeding else {
        app.navigate_to(View::Feedings);
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.previous_field(),
        KeyCode::Left if form.focused == NewFeedingField::Kind => form.cycle_kind(false),
        KeyCode::Right | KeyCode::Char(' ') if form.focused == NewFeedingField::Kind => {
            form.cycle_kind(true)
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitNewFeeding),
        KeyCode::Esc => {
            app.new_feeding = None;
            app.navigate_to(View::Feedings);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.input_char(c);
        }
        _ => {}
    }
}
