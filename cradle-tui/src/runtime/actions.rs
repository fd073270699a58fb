use std::time::Instant;

use anyhow::Result;
use cradle_client::{
    CradleClient, FeedingKind, FeedingPatch, SleepEntry, SleepKind, SleepPatch, StoreError,
};
use time::{OffsetDateTime, UtcOffset};

use crate::app::{App, CellField, CellKey, FeedingField, SleepField, TableKind, View};
use crate::time_utils::{parse_clock, to_local_time};

use super::action_queue::Action;

pub(super) async fn run_action(action: Action, app: &mut App, client: &CradleClient) -> Result<()> {
    match action {
        Action::FlushSave { key } => {
            flush_save(key, app, client).await;
        }
        Action::RefreshTable { table } => {
            refresh_table(table, app, client).await;
        }
        Action::SubmitNewFeeding => {
            submit_new_feeding(app, client).await;
        }
        Action::SubmitNewSleep => {
            submit_new_sleep(app, client).await;
        }
        Action::ConfirmDelete => {
            confirm_delete(app, client).await;
        }
    }
    Ok(())
}

/// Dispatch a settled cell edit to storage. The pending value may already
/// have been cancelled or superseded, in which case there is nothing to do.
async fn flush_save(key: CellKey, app: &mut App, client: &CradleClient) {
    let Some(raw) = app.saves.take(&key) else {
        return;
    };
    let (id, field) = key;

    let result = match field {
        CellField::Feeding(feeding_field) => match build_feeding_patch(feeding_field, &raw) {
            Ok(patch) => client.update_feeding(id, &patch).await.map(|_| ()),
            Err(message) => {
                app.set_status(format!("Not saved: {message}"));
                app.close_edit_for(key);
                return;
            }
        },
        CellField::Sleep(sleep_field) => {
            let Some(entry) = app.sleeps.iter().find(|e| e.id == id).cloned() else {
                app.set_status("Record is no longer in the list".to_string());
                app.close_edit_for(key);
                refresh_table(TableKind::Sleep, app, client).await;
                return;
            };
            match build_sleep_patch(sleep_field, &raw, &entry) {
                Ok(patch) => client.update_sleep(id, &patch).await.map(|_| ()),
                Err(message) => {
                    app.set_status(format!("Not saved: {message}"));
                    app.close_edit_for(key);
                    return;
                }
            }
        }
    };

    if let Some(table) = apply_save_outcome(app, key, result, Instant::now()) {
        refresh_table(table, app, client).await;
    }
}

/// Fold a storage outcome back into app state. Success marks the cell and
/// asks for a list refresh; failure surfaces a notice and closes the edit
/// WITHOUT touching the displayed list. Returns the table to re-fetch.
fn apply_save_outcome(
    app: &mut App,
    key: CellKey,
    result: Result<(), StoreError>,
    now: Instant,
) -> Option<TableKind> {
    let table = key.1.table();
    match result {
        Ok(()) => {
            app.flash(key, now);
            app.set_status(format!("Saved {}", key.1.name()));
            app.close_edit_for(key);
            Some(table)
        }
        Err(err) => {
            app.set_status(format!("Save failed: {err}"));
            app.close_edit_for(key);
            // The record may have vanished under us; re-fetch so the table
            // matches storage again.
            matches!(err, StoreError::NotFound).then_some(table)
        }
    }
}

/// Coerce the raw cell value into a one-field patch.
fn build_feeding_patch(field: FeedingField, raw: &str) -> Result<FeedingPatch, String> {
    let mut patch = FeedingPatch::default();
    match field {
        FeedingField::Kind => {
            patch.kind = Some(
                FeedingKind::parse(raw).ok_or_else(|| format!("unknown feeding kind {raw:?}"))?,
            );
        }
        FeedingField::Duration => {
            patch.duration_minutes = Some(
                raw.trim()
                    .parse()
                    .map_err(|_| "duration must be a whole number of minutes".to_string())?,
            );
        }
        FeedingField::Amount => {
            // An emptied amount clears the stored value.
            patch.amount_oz = Some(if raw.trim().is_empty() {
                None
            } else {
                Some(
                    raw.trim()
                        .parse()
                        .map_err(|_| "amount must be a number of ounces".to_string())?,
                )
            });
        }
        FeedingField::Notes => {
            patch.notes = Some(if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            });
        }
    }
    Ok(patch)
}

/// Coerce a sleep cell value. Clock edits land on the record's own calendar
/// date; an end clock before the start clock is stored as typed and shown as
/// a rollover.
fn build_sleep_patch(field: SleepField, raw: &str, entry: &SleepEntry) -> Result<SleepPatch, String> {
    let mut patch = SleepPatch::default();
    match field {
        SleepField::Start => {
            patch.started_at = Some(clock_on_entry_date(raw, entry)?);
        }
        SleepField::End => {
            patch.ended_at = Some(clock_on_entry_date(raw, entry)?);
        }
        SleepField::Kind => {
            patch.kind =
                Some(SleepKind::parse(raw).ok_or_else(|| format!("unknown sleep kind {raw:?}"))?);
        }
        SleepField::Notes => {
            patch.notes = Some(if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            });
        }
    }
    Ok(patch)
}

fn clock_on_entry_date(raw: &str, entry: &SleepEntry) -> Result<OffsetDateTime, String> {
    let clock = parse_clock(raw).ok_or_else(|| "time must be HH:MM".to_string())?;
    let local = to_local_time(entry.started_at);
    Ok(OffsetDateTime::new_in_offset(local.date(), clock, local.offset()).to_offset(UtcOffset::UTC))
}

/// Full replace of one table from storage. The displayed list is never
/// patched in place.
pub(super) async fn refresh_table(table: TableKind, app: &mut App, client: &CradleClient) {
    app.is_loading = true;
    match table {
        TableKind::Feedings => match client.list_feedings().await {
            Ok(entries) => app.replace_feedings(entries),
            Err(err) => app.set_status(format!("Could not refresh feedings: {err}")),
        },
        TableKind::Sleep => match client.list_sleep().await {
            Ok(entries) => app.replace_sleeps(entries),
            Err(err) => app.set_status(format!("Could not refresh sleep: {err}")),
        },
    }
    app.is_loading = false;
}

async fn submit_new_feeding(app: &mut App, client: &CradleClient) {
    let Some(form) = &app.new_feeding else {
        return;
    };
    let now_local = to_local_time(OffsetDateTime::now_utc());
    let candidate = match form.validate(now_local) {
        Ok(candidate) => candidate,
        Err(message) => {
            if let Some(form) = &mut app.new_feeding {
                form.error = Some(message);
            }
            return;
        }
    };

    match client.create_feeding(&candidate).await {
        Ok(_) => {
            app.new_feeding = None;
            app.navigate_to(View::Feedings);
            app.set_status("Feeding logged".to_string());
            refresh_table(TableKind::Feedings, app, client).await;
        }
        Err(err) => {
            if let Some(form) = &mut app.new_feeding {
                form.error = Some(format!("Create failed: {err}"));
            }
        }
    }
}

async fn submit_new_sleep(app: &mut App, client: &CradleClient) {
    let Some(form) = &app.new_sleep else {
        return;
    };
    let now_local = to_local_time(OffsetDateTime::now_utc());
    let candidate = match form.validate(now_local) {
        Ok(candidate) => candidate,
        Err(message) => {
            if let Some(form) = &mut app.new_sleep {
                form.error = Some(message);
            }
            return;
        }
    };

    match client.create_sleep(&candidate).await {
        Ok(_) => {
            app.new_sleep = None;
            app.navigate_to(View::Sleep);
            app.set_status("Sleep logged".to_string());
            refresh_table(TableKind::Sleep, app, client).await;
        }
        Err(err) => {
            if let Some(form) = &mut app.new_sleep {
                form.error = Some(format!("Create failed: {err}"));
            }
        }
    }
}

async fn confirm_delete(app: &mut App, client: &CradleClient) {
    let Some(ctx) = app.delete_context.take() else {
        return;
    };
    let result = match ctx.table {
        TableKind::Feedings => client.delete_feeding(ctx.id).await,
        TableKind::Sleep => client.delete_sleep(ctx.id).await,
    };
    app.navigate_to(ctx.table.view());
    match result {
        Ok(()) => {
            refresh_table(ctx.table, app, client).await;
            app.set_status("Entry deleted".to_string());
        }
        Err(err) => {
            app.set_status(format!("Delete failed: {err}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TextInput;
    use crate::config::CradleConfig;
    use crate::runtime::channel;
    use std::time::Duration;

    async fn dev_app() -> (App, CradleClient) {
        let client = CradleClient::dev();
        let mut app = App::new(&CradleConfig::default());
        app.replace_feedings(client.list_feedings().await.expect("dev list"));
        app.replace_sleeps(client.list_sleep().await.expect("dev list"));
        (app, client)
    }

    #[tokio::test]
    async fn flushed_edit_reaches_storage_and_marks_the_cell() {
        let (tx, _rx) = channel();
        let (mut app, client) = dev_app().await;
        app.open_feeding_cell(1, FeedingField::Duration, &tx);
        app.feeding_edit.as_mut().unwrap().input = TextInput::from_str("45");
        let key = app.feeding_edit.as_ref().unwrap().key();

        app.saves
            .schedule(key, "45".to_string(), Duration::ZERO, &tx);
        flush_save(key, &mut app, &client).await;

        // The refreshed list shows the stored value and the cell is marked.
        let entry = app.feedings.iter().find(|e| e.id == 1).expect("listed");
        assert_eq!(entry.duration_minutes, 45);
        assert!(app.is_flashed(&key));
        assert!(app.feeding_edit.is_none());
        assert_eq!(app.status_message.as_deref(), Some("Saved duration"));
    }

    #[tokio::test]
    async fn transport_failure_keeps_the_displayed_value() {
        let (tx, _rx) = channel();
        let (mut app, _client) = dev_app().await;
        app.open_feeding_cell(1, FeedingField::Duration, &tx);
        let key = app.feeding_edit.as_ref().unwrap().key();
        let before = app.feedings.clone();

        let refresh = apply_save_outcome(
            &mut app,
            key,
            Err(StoreError::Transport("connection refused".to_string())),
            Instant::now(),
        );

        assert_eq!(refresh, None);
        assert_eq!(app.feedings, before);
        assert!(app.feeding_edit.is_none());
        assert!(!app.is_flashed(&key));
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|s| s.starts_with("Save failed")));
    }

    #[tokio::test]
    async fn vanished_record_triggers_a_refresh() {
        let (tx, _rx) = channel();
        let (mut app, _client) = dev_app().await;
        app.open_feeding_cell(1, FeedingField::Duration, &tx);
        let key = app.feeding_edit.as_ref().unwrap().key();

        let refresh = apply_save_outcome(&mut app, key, Err(StoreError::NotFound), Instant::now());
        assert_eq!(refresh, Some(TableKind::Feedings));
    }

    #[tokio::test]
    async fn unparseable_value_never_reaches_storage() {
        let (tx, _rx) = channel();
        let (mut app, client) = dev_app().await;
        app.open_feeding_cell(1, FeedingField::Duration, &tx);
        let key = app.feeding_edit.as_ref().unwrap().key();
        app.saves
            .schedule(key, "4x".to_string(), Duration::ZERO, &tx);

        flush_save(key, &mut app, &client).await;

        let entry = app.feedings.iter().find(|e| e.id == 1).expect("listed");
        assert_eq!(entry.duration_minutes, 20);
        assert!(!app.is_flashed(&key));
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|s| s.starts_with("Not saved")));
    }

    #[tokio::test]
    async fn delete_removes_the_record_after_confirmation() {
        let (mut app, client) = dev_app().await;
        app.focused_feeding_index = Some(
            app.feedings
                .iter()
                .position(|e| e.id == 2)
                .expect("seeded"),
        );
        app.enter_delete_confirm();
        assert_eq!(app.current_view, View::ConfirmDelete);

        confirm_delete(&mut app, &client).await;

        assert!(app.feedings.iter().all(|e| e.id != 2));
        assert_eq!(app.current_view, View::Feedings);
        assert_eq!(app.status_message.as_deref(), Some("Entry deleted"));
    }

    #[test]
    fn amount_coercion_clears_on_empty() {
        let patch = build_feeding_patch(FeedingField::Amount, "").expect("valid");
        assert_eq!(patch.amount_oz, Some(None));

        let patch = build_feeding_patch(FeedingField::Amount, "3.5").expect("valid");
        assert_eq!(patch.amount_oz, Some(Some(3.5)));

        assert!(build_feeding_patch(FeedingField::Amount, "much").is_err());
    }
}
