use crate::app::{App, NewSleepField, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_new_sleep_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = &mut app.new_sleep else {
        app.navigate_to(View::Sleep);
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.previous_field(),
        KeyCode::Char(' ') if form.focused == NewSleepField::Kind => form.toggle_kind(),
        KeyCode::Left | KeyCode::Right if form.focused == NewSleepField::Kind => {
            form.toggle_kind()
        }
        // Quick-pick: walk the suggested end times for this sleep kind.
        // Notes keeps the letter for typing.
        KeyCode::Char('p') | KeyCode::Char('P')
            if form.focused != NewSleepField::Notes =>
        {
            form.cycle_preset()
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => enqueue_action(action_tx, Action::SubmitNewSleep),
        KeyCode::Esc => {
            app.new_sleep = None;
            app.navigate_to(View::Sleep);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.input_char(c);
        }
        _ => {}
    }
}
