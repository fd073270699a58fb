use crate::app::{App, FeedingField, NewFeedingForm, TableKind, View};
use crate::time_utils::to_local_time;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use cradle_client::FeedingKind;
use ratatui::layout::Position;

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_feedings_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.feeding_edit.is_some() {
        handle_edit_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.feeding_focus_up(),
        KeyCode::Down | KeyCode::Char('j') => app.feeding_focus_down(),
        KeyCode::Enter => {
            // Open the row for editing, starting at its first field.
            if app.focused_feeding_index.is_none() && !app.feedings.is_empty() {
                app.focused_feeding_index = Some(0);
            }
            if let Some(entry) = app.focused_feeding() {
                let id = entry.id;
                app.open_feeding_cell(id, FeedingField::Kind, action_tx);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.navigate_to(View::NewFeeding);
            app.new_feeding = Some(NewFeedingForm::new(to_local_time(
                time::OffsetDateTime::now_utc(),
            )));
        }
        KeyCode::Char('d') | KeyCode::Char('D') => app.enter_delete_confirm(),
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.navigate_to(View::Sleep);
            enqueue_action(
                action_tx,
                Action::RefreshTable {
                    table: TableKind::Sleep,
                },
            );
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            enqueue_action(
                action_tx,
                Action::RefreshTable {
                    table: TableKind::Feedings,
                },
            );
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_edit_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let field = match &app.feeding_edit {
        Some(edit) => edit.field,
        None => return,
    };

    match key.code {
        KeyCode::Tab => app.feeding_tab_advance(action_tx),
        KeyCode::Esc => app.discard_feeding_edit(),
        KeyCode::Enter => app.commit_feeding_in_place(action_tx),
        KeyCode::Backspace => app.feeding_input_backspace(),
        KeyCode::Up | KeyCode::Down | KeyCode::Char(' ') if field == FeedingField::Kind => {
            app.feeding_cycle_kind(key.code != KeyCode::Up);
        }
        KeyCode::Left => {
            if field == FeedingField::Kind {
                app.feeding_cycle_kind(false);
            } else {
                app.feeding_input_move_cursor(true);
            }
        }
        KeyCode::Right => {
            if field == FeedingField::Kind {
                app.feeding_cycle_kind(true);
            } else {
                app.feeding_input_move_cursor(false);
            }
        }
        KeyCode::Home => app.feeding_input_cursor_home_end(true),
        KeyCode::End => app.feeding_input_cursor_home_end(false),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.feeding_input_char(c);
        }
        _ => {}
    }
}

pub(super) fn handle_feedings_click(x: u16, y: u16, app: &mut App, action_tx: &ActionTx) {
    let Some(area) = app.feedings_table_area else {
        return;
    };
    if !area.contains(Position { x, y }) {
        // Pointer left the table: the open cell's value is read and
        // committed on the way out.
        app.close_feeding_edit_commit(action_tx);
        return;
    }

    let Some((row, field)) = ui::feedings_view::hit_test(area, x, y, app.feedings_scroll) else {
        return;
    };
    let Some(entry) = app.feedings.get(row) else {
        return;
    };
    let (id, kind) = (entry.id, entry.kind);
    app.focused_feeding_index = Some(row);

    match field {
        // Amount is only editable on bottle feedings.
        Some(FeedingField::Amount) if kind != FeedingKind::Bottle => {}
        Some(field) => app.open_feeding_cell(id, field, action_tx),
        None => {}
    }
}
