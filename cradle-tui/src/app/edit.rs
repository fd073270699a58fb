use cradle_client::FeedingKind;

use crate::app::state::{CellField, FeedingEdit, FeedingField, SleepEdit, SleepField, TextInput};
use crate::app::App;
use crate::runtime::ActionTx;
use crate::time_utils::{format_clock, to_local_time};

impl App {
    // --- Feedings table -----------------------------------------------------

    /// Open one cell of the feedings table for editing. If another cell is
    /// already open its value is committed first; the table never has two
    /// open cells.
    pub fn open_feeding_cell(&mut self, id: i64, field: FeedingField, tx: &ActionTx) {
        if let Some(edit) = self.feeding_edit.take() {
            if edit.id == id && edit.field == field {
                self.feeding_edit = Some(edit);
                return;
            }
            self.commit_feeding_cell(edit, tx);
        }
        self.feeding_edit = self.make_feeding_edit(id, field);
    }

    /// Leave feedings edit mode, committing the open cell's value. This is
    /// the outside-click exit for feedings.
    pub fn close_feeding_edit_commit(&mut self, tx: &ActionTx) {
        if let Some(edit) = self.feeding_edit.take() {
            self.commit_feeding_cell(edit, tx);
        }
    }

    /// Leave feedings edit mode without committing, dropping any pending
    /// save for the open cell (Escape).
    pub fn discard_feeding_edit(&mut self) {
        if let Some(edit) = self.feeding_edit.take() {
            self.saves.cancel(&edit.key());
        }
    }

    /// Commit the open cell's value in place (Enter). The edit stays open
    /// until the save outcome closes it.
    pub fn commit_feeding_in_place(&mut self, tx: &ActionTx) {
        if let Some(edit) = &self.feeding_edit {
            let key = edit.key();
            let value = edit.current_value();
            self.saves.schedule(key, value, self.feeding_save_delay, tx);
        }
    }

    /// Tab: commit the field being left when its value changed, then open
    /// the next field of the same record. Never crosses records. The amount
    /// field is skipped when the feeding is not a bottle.
    pub fn feeding_tab_advance(&mut self, tx: &ActionTx) {
        let Some(edit) = self.feeding_edit.take() else {
            return;
        };
        let id = edit.id;
        let effective_kind = match edit.field {
            FeedingField::Kind => edit.kind_choice,
            _ => match self.feedings.iter().find(|e| e.id == id) {
                Some(entry) => entry.kind,
                None => FeedingKind::Breast,
            },
        };

        let mut next = edit.field.next();
        if next == FeedingField::Amount && effective_kind != FeedingKind::Bottle {
            next = next.next();
        }

        if edit.is_dirty() {
            self.commit_feeding_cell(edit, tx);
        }
        self.feeding_edit = self.make_feeding_edit(id, next);
    }

    fn commit_feeding_cell(&mut self, edit: FeedingEdit, tx: &ActionTx) {
        let key = edit.key();
        self.saves
            .schedule(key, edit.current_value(), self.feeding_save_delay, tx);
    }

    fn make_feeding_edit(&self, id: i64, field: FeedingField) -> Option<FeedingEdit> {
        let entry = self.feedings.iter().find(|e| e.id == id)?;
        let displayed = match field {
            FeedingField::Kind => entry.kind.label().to_string(),
            FeedingField::Duration => entry.duration_minutes.to_string(),
            FeedingField::Amount => entry.amount_oz.map(|a| a.to_string()).unwrap_or_default(),
            FeedingField::Notes => entry.notes.clone().unwrap_or_default(),
        };
        Some(FeedingEdit {
            id,
            field,
            input: TextInput::from_str(&displayed),
            kind_choice: entry.kind,
            original: displayed,
        })
    }

    /// Route a typed character into the open feedings cell.
    pub fn feeding_input_char(&mut self, c: char) {
        let Some(edit) = &mut self.feeding_edit else {
            return;
        };
        match edit.field {
            FeedingField::Kind => {}
            FeedingField::Duration => {
                if c.is_ascii_digit() {
                    edit.input.insert(c);
                }
            }
            FeedingField::Amount => {
                if c.is_ascii_digit() || (c == '.' && !edit.input.value.contains('.')) {
                    edit.input.insert(c);
                }
            }
            FeedingField::Notes => edit.input.insert(c),
        }
    }

    pub fn feeding_input_backspace(&mut self) {
        if let Some(edit) = &mut self.feeding_edit {
            if edit.field != FeedingField::Kind {
                edit.input.backspace();
            }
        }
    }

    pub fn feeding_input_move_cursor(&mut self, left: bool) {
        if let Some(edit) = &mut self.feeding_edit {
            if edit.field == FeedingField::Notes {
                if left {
                    edit.input.move_left();
                } else {
                    edit.input.move_right();
                }
            }
        }
    }

    pub fn feeding_input_cursor_home_end(&mut self, home: bool) {
        if let Some(edit) = &mut self.feeding_edit {
            if edit.field == FeedingField::Notes {
                if home {
                    edit.input.home();
                } else {
                    edit.input.end();
                }
            }
        }
    }

    /// Cycle the kind choice while the kind cell is open.
    pub fn feeding_cycle_kind(&mut self, forward: bool) {
        if let Some(edit) = &mut self.feeding_edit {
            if edit.field == FeedingField::Kind {
                edit.kind_choice = if forward {
                    edit.kind_choice.next()
                } else {
                    edit.kind_choice.previous()
                };
            }
        }
    }

    // --- Sleep table --------------------------------------------------------

    /// Open one cell of the sleep table. A previously open cell is discarded
    /// (its pending save cancelled): leaving a sleep cell never commits
    /// implicitly, the settle timer is the only commit path.
    pub fn open_sleep_cell(&mut self, id: i64, field: SleepField) {
        if let Some(edit) = self.sleep_edit.take() {
            if edit.id == id && edit.field == field {
                self.sleep_edit = Some(edit);
                return;
            }
            self.saves.cancel(&edit.key());
        }
        self.sleep_edit = self.make_sleep_edit(id, field);
    }

    /// Leave sleep edit mode without committing. Outside-click and Escape
    /// both land here.
    pub fn discard_sleep_edit(&mut self) {
        if let Some(edit) = self.sleep_edit.take() {
            self.saves.cancel(&edit.key());
        }
    }

    /// Enter: settle the open cell now instead of waiting out the debounce.
    /// The edit stays open until the save outcome closes it.
    pub fn commit_sleep_in_place(&mut self, tx: &ActionTx) {
        if let Some(edit) = &self.sleep_edit {
            let key = edit.key();
            let value = edit.current_value();
            self.saves
                .schedule(key, value, std::time::Duration::ZERO, tx);
        }
    }

    /// Tab: open the next field of the same record. The field being left
    /// keeps its pending settle timer; commits for different fields are
    /// independently in flight.
    pub fn sleep_tab_advance(&mut self) {
        let Some(edit) = self.sleep_edit.take() else {
            return;
        };
        let id = edit.id;
        let next = edit.field.next();
        self.sleep_edit = self.make_sleep_edit(id, next);
    }

    fn make_sleep_edit(&self, id: i64, field: SleepField) -> Option<SleepEdit> {
        let entry = self.sleeps.iter().find(|e| e.id == id)?;
        let displayed = match field {
            SleepField::Start => format_clock(to_local_time(entry.started_at).time()),
            SleepField::End => entry
                .ended_at
                .map(|t| format_clock(to_local_time(t).time()))
                .unwrap_or_default(),
            SleepField::Kind => entry.kind.label().to_string(),
            SleepField::Notes => entry.notes.clone().unwrap_or_default(),
        };
        Some(SleepEdit {
            id,
            field,
            input: TextInput::from_str(&displayed),
            kind_choice: entry.kind,
            original: displayed,
        })
    }

    /// Route a typed character into the open sleep cell and restart its
    /// settle timer with the new value.
    pub fn sleep_input_char(&mut self, c: char, tx: &ActionTx) {
        let Some(edit) = &mut self.sleep_edit else {
            return;
        };
        match edit.field {
            SleepField::Start | SleepField::End => push_clock_digit(&mut edit.input, c),
            SleepField::Notes => edit.input.insert(c),
            SleepField::Kind => return,
        }
        self.reschedule_sleep_save(tx);
    }

    pub fn sleep_input_backspace(&mut self, tx: &ActionTx) {
        let Some(edit) = &mut self.sleep_edit else {
            return;
        };
        match edit.field {
            SleepField::Start | SleepField::End => clock_backspace(&mut edit.input),
            SleepField::Notes => edit.input.backspace(),
            SleepField::Kind => return,
        }
        self.reschedule_sleep_save(tx);
    }

    /// Toggle nap/night while the kind cell is open; the selection restarts
    /// the settle timer like a keystroke.
    pub fn sleep_toggle_kind(&mut self, tx: &ActionTx) {
        let Some(edit) = &mut self.sleep_edit else {
            return;
        };
        if edit.field != SleepField::Kind {
            return;
        }
        edit.kind_choice = edit.kind_choice.toggled();
        self.reschedule_sleep_save(tx);
    }

    fn reschedule_sleep_save(&mut self, tx: &ActionTx) {
        if let Some(edit) = &self.sleep_edit {
            let key = edit.key();
            let value = edit.current_value();
            self.saves.schedule(key, value, self.sleep_save_delay, tx);
        }
    }

    /// Close whichever edit the save outcome was for, if it is still open.
    /// A commit for a field the user already tabbed away from leaves the
    /// newly opened cell alone.
    pub fn close_edit_for(&mut self, key: (i64, CellField)) {
        if self
            .feeding_edit
            .as_ref()
            .is_some_and(|edit| edit.key() == key)
        {
            self.feeding_edit = None;
        }
        if self
            .sleep_edit
            .as_ref()
            .is_some_and(|edit| edit.key() == key)
        {
            self.sleep_edit = None;
        }
    }
}

/// Clock fields take digits only and render as HH:MM; the colon is inserted
/// automatically and a leading 3-9 is promoted to "0X:".
pub(super) fn push_clock_digit(input: &mut TextInput, c: char) {
    input.end();
    if input.value.len() >= 5 {
        input.clear();
    }
    if !c.is_ascii_digit() {
        return;
    }
    if input.value.is_empty() && ('3'..='9').contains(&c) {
        input.insert('0');
        input.insert(c);
        input.insert(':');
        return;
    }
    input.insert(c);
    if input.value.len() == 2 {
        input.insert(':');
    }
}

pub(super) fn clock_backspace(input: &mut TextInput) {
    input.end();
    if input.value.ends_with(':') {
        input.backspace();
    }
    input.backspace();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TableKind;
    use crate::config::CradleConfig;
    use crate::runtime::{channel, Action};
    use cradle_client::{FeedingEntry, SleepEntry, SleepKind};
    use time::macros::datetime;

    fn feeding(id: i64, kind: FeedingKind) -> FeedingEntry {
        FeedingEntry {
            id,
            fed_at: datetime!(2026-03-02 08:30 UTC),
            kind,
            duration_minutes: 20,
            amount_oz: if kind == FeedingKind::Bottle {
                Some(4.0)
            } else {
                None
            },
            notes: None,
        }
    }

    fn sleep(id: i64) -> SleepEntry {
        SleepEntry {
            id,
            started_at: datetime!(2026-03-02 13:00 UTC),
            ended_at: Some(datetime!(2026-03-02 14:30 UTC)),
            kind: SleepKind::Nap,
            notes: None,
        }
    }

    fn test_app() -> App {
        let mut app = App::new(&CradleConfig::default());
        app.replace_feedings(vec![feeding(1, FeedingKind::Bottle), feeding(2, FeedingKind::Breast)]);
        app.replace_sleeps(vec![sleep(10)]);
        app
    }

    #[tokio::test]
    async fn tab_cycles_feeding_fields_in_fixed_order() {
        let (tx, _rx) = channel();
        let mut app = test_app();
        app.open_feeding_cell(1, FeedingField::Kind, &tx);

        let mut seen = vec![app.feeding_edit.as_ref().unwrap().field];
        for _ in 0..4 {
            app.feeding_tab_advance(&tx);
            seen.push(app.feeding_edit.as_ref().unwrap().field);
        }

        assert_eq!(
            seen,
            vec![
                FeedingField::Kind,
                FeedingField::Duration,
                FeedingField::Amount,
                FeedingField::Notes,
                FeedingField::Kind,
            ]
        );
    }

    #[tokio::test]
    async fn tab_skips_amount_for_non_bottle_feedings() {
        let (tx, _rx) = channel();
        let mut app = test_app();
        app.open_feeding_cell(2, FeedingField::Duration, &tx);

        app.feeding_tab_advance(&tx);
        assert_eq!(
            app.feeding_edit.as_ref().unwrap().field,
            FeedingField::Notes
        );
    }

    #[tokio::test]
    async fn tab_commits_only_when_the_value_changed() {
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.open_feeding_cell(1, FeedingField::Duration, &tx);

        // Unchanged value: no save scheduled.
        app.feeding_tab_advance(&tx);
        assert!(rx.try_recv().is_err());

        // Changed value: the field being left is committed.
        app.feeding_edit.as_mut().unwrap().input = TextInput::from_str("45");
        let left_key = app.feeding_edit.as_ref().unwrap().key();
        app.feeding_tab_advance(&tx);
        assert_eq!(rx.try_recv().ok(), Some(Action::FlushSave { key: left_key }));
        assert_eq!(app.saves.take(&left_key), Some("45".to_string()));
    }

    #[tokio::test]
    async fn opening_a_second_feeding_cell_commits_the_first() {
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.open_feeding_cell(1, FeedingField::Duration, &tx);
        app.feeding_input_char('9');
        let first_key = app.feeding_edit.as_ref().unwrap().key();

        app.open_feeding_cell(1, FeedingField::Notes, &tx);

        // Exactly one open cell, and the previous one went through commit.
        assert_eq!(
            app.feeding_edit.as_ref().unwrap().field,
            FeedingField::Notes
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::FlushSave { key: first_key })
        );
        assert_eq!(app.saves.take(&first_key), Some("209".to_string()));
    }

    #[tokio::test]
    async fn opening_a_second_sleep_cell_discards_the_first() {
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.open_sleep_cell(10, SleepField::Notes);
        app.sleep_input_char('h', &tx);
        let first_key = app.sleep_edit.as_ref().unwrap().key();
        assert!(app.saves.has_pending(&first_key));

        app.open_sleep_cell(10, SleepField::Start);

        assert_eq!(app.sleep_edit.as_ref().unwrap().field, SleepField::Start);
        assert!(!app.saves.has_pending(&first_key));
        // The debounce timer was cancelled, nothing flushes.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn escape_discards_without_committing() {
        let (tx, mut rx) = channel();
        let mut app = test_app();
        app.open_sleep_cell(10, SleepField::Notes);
        app.sleep_input_char('x', &tx);
        let key = app.sleep_edit.as_ref().unwrap().key();

        app.discard_sleep_edit();

        assert!(app.sleep_edit.is_none());
        assert!(!app.saves.has_pending(&key));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn clock_input_inserts_colon_and_promotes_large_leading_digit() {
        let (tx, _rx) = channel();
        let mut app = test_app();
        app.open_sleep_cell(10, SleepField::End);
        app.sleep_edit.as_mut().unwrap().input.clear();

        app.sleep_input_char('7', &tx);
        assert_eq!(app.sleep_edit.as_ref().unwrap().input.value, "07:");
        app.sleep_input_char('3', &tx);
        app.sleep_input_char('0', &tx);
        assert_eq!(app.sleep_edit.as_ref().unwrap().input.value, "07:30");
    }

    #[tokio::test]
    async fn save_outcome_only_closes_its_own_cell() {
        let (tx, _rx) = channel();
        let mut app = test_app();
        app.open_feeding_cell(1, FeedingField::Duration, &tx);
        let duration_key = app.feeding_edit.as_ref().unwrap().key();
        app.feeding_tab_advance(&tx);

        // Outcome for the tabbed-away field leaves the open cell alone.
        app.close_edit_for(duration_key);
        assert!(app.feeding_edit.is_some());

        let open_key = app.feeding_edit.as_ref().unwrap().key();
        app.close_edit_for(open_key);
        assert!(app.feeding_edit.is_none());
        assert_eq!(duration_key.1.table(), TableKind::Feedings);
    }
}
