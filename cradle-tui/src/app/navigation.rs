use crate::app::App;

impl App {
    pub fn feeding_focus_down(&mut self) {
        if self.feedings.is_empty() {
            return;
        }
        let next = match self.focused_feeding_index {
            None => 0,
            Some(idx) => (idx + 1).min(self.feedings.len() - 1),
        };
        self.focused_feeding_index = Some(next);
        self.scroll_feedings_into_view();
    }

    pub fn feeding_focus_up(&mut self) {
        if self.feedings.is_empty() {
            return;
        }
        let next = match self.focused_feeding_index {
            None => 0,
            Some(idx) => idx.saturating_sub(1),
        };
        self.focused_feeding_index = Some(next);
        self.scroll_feedings_into_view();
    }

    pub fn sleep_focus_down(&mut self) {
        if self.sleeps.is_empty() {
            return;
        }
        let next = match self.focused_sleep_index {
            None => 0,
            Some(idx) => (idx + 1).min(self.sleeps.len() - 1),
        };
        self.focused_sleep_index = Some(next);
        self.scroll_sleep_into_view();
    }

    pub fn sleep_focus_up(&mut self) {
        if self.sleeps.is_empty() {
            return;
        }
        let next = match self.focused_sleep_index {
            None => 0,
            Some(idx) => idx.saturating_sub(1),
        };
        self.focused_sleep_index = Some(next);
        self.scroll_sleep_into_view();
    }

    fn scroll_feedings_into_view(&mut self) {
        let Some(idx) = self.focused_feeding_index else {
            return;
        };
        if idx < self.feedings_scroll {
            self.feedings_scroll = idx;
        } else if self.feedings_view_height > 0
            && idx >= self.feedings_scroll + self.feedings_view_height
        {
            self.feedings_scroll = idx + 1 - self.feedings_view_height;
        }
    }

    fn scroll_sleep_into_view(&mut self) {
        let Some(idx) = self.focused_sleep_index else {
            return;
        };
        if idx < self.sleep_scroll {
            self.sleep_scroll = idx;
        } else if self.sleep_view_height > 0 && idx >= self.sleep_scroll + self.sleep_view_height {
            self.sleep_scroll = idx + 1 - self.sleep_view_height;
        }
    }
}
