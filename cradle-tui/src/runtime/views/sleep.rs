use crate::app::{App, NewSleepForm, SleepField, TableKind, View};
use crate::time_utils::to_local_time;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Position;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_sleep_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.sleep_edit.is_some() {
        handle_edit_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.sleep_focus_up(),
        KeyCode::Down | KeyCode::Char('j') => app.sleep_focus_down(),
        KeyCode::Enter => {
            if app.focused_sleep_index.is_none() && !app.sleeps.is_empty() {
                app.focused_sleep_index = Some(0);
            }
            if let Some(entry) = app.focused_sleep() {
                let id = entry.id;
                app.open_sleep_cell(id, SleepField::Start);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.navigate_to(View::NewSleep);
            app.new_sleep = Some(NewSleepForm::new(to_local_time(
                time::OffsetDateTime::now_utc(),
            )));
        }
        KeyCode::Char('d') | KeyCode::Char('D') => app.enter_delete_confirm(),
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.navigate_to(View::Feedings);
            enqueue_action(
                action_tx,
                Action::RefreshTable {
                    table: TableKind::Feedings,
                },
            );
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            enqueue_action(
                action_tx,
                Action::RefreshTable {
                    table: TableKind::Sleep,
                },
            );
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let field = match &app.sleep_edit {
        Some(edit) => edit.field,
        None => return,
    };

    match key.code {
        KeyCode::Tab => app.sleep_tab_advance(),
        KeyCode::Esc => app.discard_sleep_edit(),
        KeyCode::Enter => app.commit_sleep_in_place(action_tx),
        KeyCode::Backspace => app.sleep_input_backspace(action_tx),
        KeyCode::Up | KeyCode::Down | KeyCode::Char(' ') if field == SleepField::Kind => {
            app.sleep_toggle_kind(action_tx);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.sleep_input_char(c, action_tx);
        }
        _ => {}
    }
}

pub(super) fn handle_sleep_click(x: u16, y: u16, app: &mut App, _action_tx: &ActionTx) {
    let Some(area) = app.sleep_table_area else {
        return;
    };
    if !area.contains(Position { x, y }) {
        // Pointer left the table: sleep edits are dropped, not committed.
        app.discard_sleep_edit();
        return;
    }

    let Some((row, field)) = ui::sleep_view::hit_test(area, x, y, app.sleep_scroll) else {
        return;
    };
    if row >= app.sleeps.len() {
        return;
    }
    let id = app.sleeps[row].id;
    app.focused_sleep_index = Some(row);

    if let Some(field) = field {
        app.open_sleep_cell(id, field);
    }
}
