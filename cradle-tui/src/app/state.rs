use cradle_client::{FeedingKind, SleepKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Feedings,
    Sleep,
    NewFeeding,
    NewSleep,
    ConfirmDelete,
}

/// Which record table a value belongs to. Doubles as the cache key the
/// fetch layer invalidates after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Feedings,
    Sleep,
}

impl TableKind {
    pub fn view(self) -> View {
        match self {
            TableKind::Feedings => View::Feedings,
            TableKind::Sleep => View::Sleep,
        }
    }
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    /// Move cursor one char to the left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    /// Move cursor one char to the right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }
    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}

/// Feedings-table columns open to inline editing. `Amount` stays in the
/// cycle even for non-bottle rows; the key handler skips it at display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedingField {
    Kind,
    Duration,
    Amount,
    Notes,
}

impl FeedingField {
    pub fn next(self) -> Self {
        match self {
            FeedingField::Kind => FeedingField::Duration,
            FeedingField::Duration => FeedingField::Amount,
            FeedingField::Amount => FeedingField::Notes,
            FeedingField::Notes => FeedingField::Kind,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FeedingField::Kind => "kind",
            FeedingField::Duration => "duration",
            FeedingField::Amount => "amount",
            FeedingField::Notes => "notes",
        }
    }
}

/// Sleep-table columns. Every sleep field goes through the debounced save
/// path as a whole-value replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleepField {
    Start,
    End,
    Kind,
    Notes,
}

impl SleepField {
    pub fn next(self) -> Self {
        match self {
            SleepField::Start => SleepField::End,
            SleepField::End => SleepField::Kind,
            SleepField::Kind => SleepField::Notes,
            SleepField::Notes => SleepField::Start,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SleepField::Start => "start",
            SleepField::End => "end",
            SleepField::Kind => "kind",
            SleepField::Notes => "notes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellField {
    Feeding(FeedingField),
    Sleep(SleepField),
}

impl CellField {
    pub fn table(self) -> TableKind {
        match self {
            CellField::Feeding(_) => TableKind::Feedings,
            CellField::Sleep(_) => TableKind::Sleep,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CellField::Feeding(f) => f.name(),
            CellField::Sleep(f) => f.name(),
        }
    }
}

/// Addresses one editable cell: record id plus column.
pub type CellKey = (i64, CellField);

/// The open cell of the feedings table. One per table at most; opening
/// another cell closes this one first.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedingEdit {
    pub id: i64,
    pub field: FeedingField,
    /// Text fields edit here; the kind field edits `kind_choice` instead.
    pub input: TextInput,
    pub kind_choice: FeedingKind,
    /// Displayed value when the field was opened, for change detection.
    pub original: String,
}

impl FeedingEdit {
    pub fn key(&self) -> CellKey {
        (self.id, CellField::Feeding(self.field))
    }

    /// The value the cell currently shows, as the raw token the save
    /// pipeline coerces.
    pub fn current_value(&self) -> String {
        match self.field {
            FeedingField::Kind => self.kind_choice.label().to_string(),
            _ => self.input.value.clone(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.current_value() != self.original
    }
}

/// The open cell of the sleep table.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepEdit {
    pub id: i64,
    pub field: SleepField,
    pub input: TextInput,
    pub kind_choice: SleepKind,
    pub original: String,
}

impl SleepEdit {
    pub fn key(&self) -> CellKey {
        (self.id, CellField::Sleep(self.field))
    }

    pub fn current_value(&self) -> String {
        match self.field {
            SleepField::Kind => self.kind_choice.label().to_string(),
            _ => self.input.value.clone(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.current_value() != self.original
    }
}

/// What the delete dialog is about to remove.
#[derive(Debug, Clone)]
pub struct DeleteContext {
    pub table: TableKind,
    pub id: i64,
    pub display_label: String,
    pub display_detail: String,
}
