use std::collections::HashMap;
use std::time::{Duration, Instant};

use cradle_client::{FeedingEntry, SleepEntry};
use ratatui::layout::Rect;

use crate::config::CradleConfig;

mod edit;
mod forms;
mod navigation;
mod saves;
mod state;

pub use forms::{NewFeedingField, NewFeedingForm, NewSleepField, NewSleepForm};
pub use saves::SaveQueue;
pub use state::{
    CellField, CellKey, DeleteContext, FeedingEdit, FeedingField, SleepEdit, SleepField, TableKind,
    TextInput, View,
};

/// How long a freshly saved cell stays marked in the table.
pub const FLASH_WINDOW: Duration = Duration::from_millis(1000);

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub status_message: Option<String>,

    // Record lists. Owned by the fetch layer: replaced wholesale after every
    // successful write, never patched in place.
    pub feedings: Vec<FeedingEntry>,
    pub sleeps: Vec<SleepEntry>,

    // Row focus and scrolling per table
    pub focused_feeding_index: Option<usize>,
    pub focused_sleep_index: Option<usize>,
    pub feedings_scroll: usize,
    pub sleep_scroll: usize,
    pub feedings_view_height: usize, // Last-rendered inner height (updated by renderer each frame)
    pub sleep_view_height: usize,

    // Inline cell editing, at most one open cell per table
    pub feeding_edit: Option<FeedingEdit>,
    pub sleep_edit: Option<SleepEdit>,

    // Cell edits waiting out their settle delay
    pub saves: SaveQueue,

    // Freshly saved cells, pruned every tick
    pub flash_marks: HashMap<CellKey, Instant>,

    // Table hit regions (updated by the renderer each frame, used by the
    // mouse handler to tell cell clicks from outside-table clicks)
    pub feedings_table_area: Option<Rect>,
    pub sleep_table_area: Option<Rect>,

    // Record composition forms
    pub new_feeding: Option<NewFeedingForm>,
    pub new_sleep: Option<NewSleepForm>,

    // Delete confirmation
    pub delete_context: Option<DeleteContext>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Settle delays from config
    pub feeding_save_delay: Duration,
    pub sleep_save_delay: Duration,
}

impl App {
    pub fn new(cfg: &CradleConfig) -> Self {
        Self {
            running: true,
            current_view: View::Feedings,
            status_message: None,
            feedings: Vec::new(),
            sleeps: Vec::new(),
            focused_feeding_index: None,
            focused_sleep_index: None,
            feedings_scroll: 0,
            sleep_scroll: 0,
            feedings_view_height: 0,
            sleep_view_height: 0,
            feeding_edit: None,
            sleep_edit: None,
            saves: SaveQueue::new(),
            flash_marks: HashMap::new(),
            feedings_table_area: None,
            sleep_table_area: None,
            new_feeding: None,
            new_sleep: None,
            delete_context: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            feeding_save_delay: Duration::from_millis(cfg.feeding_save_delay_ms),
            sleep_save_delay: Duration::from_millis(cfg.sleep_save_delay_ms),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Navigate to a different view. Inline edits of the table being left
    /// are transient and dropped (their pending saves cancelled).
    pub fn navigate_to(&mut self, view: View) {
        if view != self.current_view {
            self.discard_feeding_edit();
            self.discard_sleep_edit();
        }
        self.current_view = view;
        self.clear_status();
    }

    /// Replace the feedings list with a fresh fetch. Newest first.
    pub fn replace_feedings(&mut self, mut entries: Vec<FeedingEntry>) {
        entries.sort_by(|a, b| b.fed_at.cmp(&a.fed_at));
        self.feedings = entries;
        if self.feedings.is_empty() {
            self.focused_feeding_index = None;
        } else if let Some(idx) = self.focused_feeding_index {
            self.focused_feeding_index = Some(idx.min(self.feedings.len() - 1));
        }
    }

    /// Replace the sleep list with a fresh fetch. Newest first.
    pub fn replace_sleeps(&mut self, mut entries: Vec<SleepEntry>) {
        entries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        self.sleeps = entries;
        if self.sleeps.is_empty() {
            self.focused_sleep_index = None;
        } else if let Some(idx) = self.focused_sleep_index {
            self.focused_sleep_index = Some(idx.min(self.sleeps.len() - 1));
        }
    }

    pub fn focused_feeding(&self) -> Option<&FeedingEntry> {
        self.focused_feeding_index
            .and_then(|idx| self.feedings.get(idx))
    }

    pub fn focused_sleep(&self) -> Option<&SleepEntry> {
        self.focused_sleep_index.and_then(|idx| self.sleeps.get(idx))
    }

    /// Mark a cell as freshly saved. Re-marking replaces the expiry rather
    /// than stacking a second window.
    pub fn flash(&mut self, key: CellKey, now: Instant) {
        self.flash_marks.insert(key, now + FLASH_WINDOW);
    }

    pub fn prune_flashes(&mut self, now: Instant) {
        self.flash_marks.retain(|_, expires_at| *expires_at > now);
    }

    pub fn is_flashed(&self, key: &CellKey) -> bool {
        self.flash_marks.contains_key(key)
    }

    /// Populate delete_context from the focused row of the current table and
    /// switch to the confirmation dialog.
    pub fn enter_delete_confirm(&mut self) {
        let ctx = match self.current_view {
            View::Feedings => {
                let entry = match self.focused_feeding() {
                    Some(e) => e,
                    None => return,
                };
                let local = crate::time_utils::to_local_time(entry.fed_at);
                DeleteContext {
                    table: TableKind::Feedings,
                    id: entry.id,
                    display_label: format!(
                        "{} feeding, {}m",
                        entry.kind.label(),
                        entry.duration_minutes
                    ),
                    display_detail: format!(
                        "{} {}",
                        local.date(),
                        crate::time_utils::format_clock(local.time())
                    ),
                }
            }
            View::Sleep => {
                let entry = match self.focused_sleep() {
                    Some(e) => e,
                    None => return,
                };
                let local = crate::time_utils::to_local_time(entry.started_at);
                DeleteContext {
                    table: TableKind::Sleep,
                    id: entry.id,
                    display_label: format!("{} sleep", entry.kind.label()),
                    display_detail: format!(
                        "{} {}",
                        local.date(),
                        crate::time_utils::format_clock(local.time())
                    ),
                }
            }
            _ => return,
        };
        self.delete_context = Some(ctx);
        self.navigate_to(View::ConfirmDelete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{CellField, FeedingField};

    fn test_app() -> App {
        App::new(&CradleConfig::default())
    }

    #[test]
    fn remarking_a_cell_replaces_the_expiry() {
        let mut app = test_app();
        let key = (7, CellField::Feeding(FeedingField::Duration));
        let start = Instant::now();

        app.flash(key, start);
        app.flash(key, start + Duration::from_millis(600));
        assert_eq!(app.flash_marks.len(), 1);

        // Past the first window but inside the refreshed one.
        app.prune_flashes(start + FLASH_WINDOW + Duration::from_millis(100));
        assert!(app.is_flashed(&key));

        app.prune_flashes(start + Duration::from_millis(600) + FLASH_WINDOW);
        assert!(!app.is_flashed(&key));
    }

    #[test]
    fn flash_expires_after_its_window() {
        let mut app = test_app();
        let key = (7, CellField::Feeding(FeedingField::Duration));
        let start = Instant::now();

        app.flash(key, start);
        app.prune_flashes(start + Duration::from_millis(500));
        assert!(app.is_flashed(&key));
        app.prune_flashes(start + FLASH_WINDOW);
        assert!(!app.is_flashed(&key));
    }
}
