use cradle_client::{FeedingKind, NewFeeding, NewSleep, SleepKind};
use time::{OffsetDateTime, UtcOffset};

use super::edit::{clock_backspace, push_clock_digit};
use crate::app::state::TextInput;
use crate::duration::{self, RangeFit};
use crate::time_utils::{format_clock, parse_clock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewFeedingField {
    Time,
    Kind,
    Duration,
    Amount,
    Notes,
}

impl NewFeedingField {
    fn next(self) -> Self {
        match self {
            NewFeedingField::Time => NewFeedingField::Kind,
            NewFeedingField::Kind => NewFeedingField::Duration,
            NewFeedingField::Duration => NewFeedingField::Amount,
            NewFeedingField::Amount => NewFeedingField::Notes,
            NewFeedingField::Notes => NewFeedingField::Time,
        }
    }

    fn previous(self) -> Self {
        match self {
            NewFeedingField::Time => NewFeedingField::Notes,
            NewFeedingField::Kind => NewFeedingField::Time,
            NewFeedingField::Duration => NewFeedingField::Kind,
            NewFeedingField::Amount => NewFeedingField::Duration,
            NewFeedingField::Notes => NewFeedingField::Amount,
        }
    }
}

/// Composition form for a new feeding. Whole-record create: the inline-edit
/// and settle-delay machinery is not involved.
#[derive(Debug, Clone)]
pub struct NewFeedingForm {
    pub time_input: TextInput,
    pub kind: FeedingKind,
    pub duration_input: TextInput,
    pub amount_input: TextInput,
    pub notes_input: TextInput,
    pub focused: NewFeedingField,
    pub error: Option<String>,
}

impl NewFeedingForm {
    pub fn new(now_local: OffsetDateTime) -> Self {
        Self {
            time_input: TextInput::from_str(&format_clock(now_local.time())),
            kind: FeedingKind::Breast,
            duration_input: TextInput::new(),
            amount_input: TextInput::new(),
            notes_input: TextInput::new(),
            focused: NewFeedingField::Time,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
        if self.focused == NewFeedingField::Amount && self.kind != FeedingKind::Bottle {
            self.focused = self.focused.next();
        }
        self.error = None;
    }

    pub fn previous_field(&mut self) {
        self.focused = self.focused.previous();
        if self.focused == NewFeedingField::Amount && self.kind != FeedingKind::Bottle {
            self.focused = self.focused.previous();
        }
        self.error = None;
    }

    pub fn cycle_kind(&mut self, forward: bool) {
        if self.focused == NewFeedingField::Kind {
            self.kind = if forward {
                self.kind.next()
            } else {
                self.kind.previous()
            };
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focused {
            NewFeedingField::Time => push_clock_digit(&mut self.time_input, c),
            NewFeedingField::Kind => {}
            NewFeedingField::Duration => {
                if c.is_ascii_digit() {
                    self.duration_input.insert(c);
                }
            }
            NewFeedingField::Amount => {
                if c.is_ascii_digit() || (c == '.' && !self.amount_input.value.contains('.')) {
                    self.amount_input.insert(c);
                }
            }
            NewFeedingField::Notes => self.notes_input.insert(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused {
            NewFeedingField::Time => clock_backspace(&mut self.time_input),
            NewFeedingField::Kind => {}
            NewFeedingField::Duration => self.duration_input.backspace(),
            NewFeedingField::Amount => self.amount_input.backspace(),
            NewFeedingField::Notes => self.notes_input.backspace(),
        }
    }

    /// Build the creation candidate, or explain what is missing.
    pub fn validate(&self, today_local: OffsetDateTime) -> Result<NewFeeding, String> {
        let clock = parse_clock(&self.time_input.value)
            .ok_or_else(|| "Enter the feeding time as HH:MM".to_string())?;
        let duration_minutes: i64 = self
            .duration_input
            .value
            .trim()
            .parse()
            .map_err(|_| "Enter the duration in minutes".to_string())?;
        if duration_minutes < 1 {
            return Err("Duration must be at least one minute".to_string());
        }
        let amount_oz = if self.amount_input.value.trim().is_empty() {
            None
        } else {
            Some(
                self.amount_input
                    .value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| "Enter the amount in ounces".to_string())?,
            )
        };
        let notes = if self.notes_input.value.is_empty() {
            None
        } else {
            Some(self.notes_input.value.clone())
        };

        let offset = today_local.offset();
        let fed_at = OffsetDateTime::new_in_offset(today_local.date(), clock, offset)
            .to_offset(UtcOffset::UTC);

        Ok(NewFeeding {
            fed_at,
            kind: self.kind,
            duration_minutes,
            amount_oz,
            notes,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewSleepField {
    Start,
    End,
    Kind,
    Notes,
}

impl NewSleepField {
    fn next(self) -> Self {
        match self {
            NewSleepField::Start => NewSleepField::End,
            NewSleepField::End => NewSleepField::Kind,
            NewSleepField::Kind => NewSleepField::Notes,
            NewSleepField::Notes => NewSleepField::Start,
        }
    }

    fn previous(self) -> Self {
        match self {
            NewSleepField::Start => NewSleepField::Notes,
            NewSleepField::End => NewSleepField::Start,
            NewSleepField::Kind => NewSleepField::End,
            NewSleepField::Notes => NewSleepField::Kind,
        }
    }
}

/// Composition form for a new sleep, with quick-pick end times and a live
/// duration preview.
#[derive(Debug, Clone)]
pub struct NewSleepForm {
    pub start_input: TextInput,
    pub end_input: TextInput,
    pub kind: SleepKind,
    pub notes_input: TextInput,
    pub focused: NewSleepField,
    pub error: Option<String>,
    /// Last quick-pick applied, so repeated picks walk the preset list.
    pub preset_cursor: Option<usize>,
}

impl NewSleepForm {
    pub fn new(now_local: OffsetDateTime) -> Self {
        Self {
            start_input: TextInput::from_str(&format_clock(now_local.time())),
            end_input: TextInput::new(),
            kind: SleepKind::Nap,
            notes_input: TextInput::new(),
            focused: NewSleepField::Start,
            error: None,
            preset_cursor: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
        self.error = None;
    }

    pub fn previous_field(&mut self) {
        self.focused = self.focused.previous();
        self.error = None;
    }

    pub fn toggle_kind(&mut self) {
        if self.focused == NewSleepField::Kind {
            self.kind = self.kind.toggled();
            // The quick-pick list changed with the kind.
            self.preset_cursor = None;
        }
    }

    /// Walk the kind's quick-pick list, filling the end time from each
    /// suggestion in turn.
    pub fn cycle_preset(&mut self) {
        let presets = duration::presets_for(self.kind);
        let next = match self.preset_cursor {
            None => 0,
            Some(index) => (index + 1) % presets.len(),
        };
        self.preset_cursor = Some(next);
        self.apply_preset(next);
    }

    pub fn input_char(&mut self, c: char) {
        match self.focused {
            NewSleepField::Start => push_clock_digit(&mut self.start_input, c),
            NewSleepField::End => push_clock_digit(&mut self.end_input, c),
            NewSleepField::Kind => {}
            NewSleepField::Notes => self.notes_input.insert(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused {
            NewSleepField::Start => clock_backspace(&mut self.start_input),
            NewSleepField::End => clock_backspace(&mut self.end_input),
            NewSleepField::Kind => {}
            NewSleepField::Notes => self.notes_input.backspace(),
        }
    }

    /// Fill the end time from one of the kind's quick-pick offsets.
    pub fn apply_preset(&mut self, index: usize) {
        let Some(start) = parse_clock(&self.start_input.value) else {
            self.error = Some("Enter a start time before picking an offset".to_string());
            return;
        };
        let presets = duration::presets_for(self.kind);
        if let Some(preset) = presets.get(index) {
            let end = duration::apply_offset(start, preset.hours, preset.minutes);
            self.end_input = TextInput::from_str(&format_clock(end));
            self.error = None;
        }
    }

    /// Live duration preview while composing: minutes plus the advisory
    /// range band. None until both clocks parse.
    pub fn duration_preview(&self) -> Option<(i64, RangeFit)> {
        let start = parse_clock(&self.start_input.value)?;
        let end = parse_clock(&self.end_input.value)?;
        let minutes = duration::elapsed_minutes(start, end);
        Some((minutes, duration::classify(minutes, self.kind)))
    }

    pub fn validate(&self, today_local: OffsetDateTime) -> Result<NewSleep, String> {
        let start = parse_clock(&self.start_input.value)
            .ok_or_else(|| "Enter the start time as HH:MM".to_string())?;
        let end = if self.end_input.value.is_empty() {
            None
        } else {
            Some(
                parse_clock(&self.end_input.value)
                    .ok_or_else(|| "Enter the end time as HH:MM".to_string())?,
            )
        };
        let notes = if self.notes_input.value.is_empty() {
            None
        } else {
            Some(self.notes_input.value.clone())
        };

        let offset = today_local.offset();
        let date = today_local.date();
        let started_at =
            OffsetDateTime::new_in_offset(date, start, offset).to_offset(UtcOffset::UTC);
        // The end clock lands on the same date; an end before the start is
        // displayed as rolling over into the next day.
        let ended_at =
            end.map(|t| OffsetDateTime::new_in_offset(date, t, offset).to_offset(UtcOffset::UTC));

        Ok(NewSleep {
            started_at,
            ended_at,
            kind: self.kind,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn preset_fills_the_end_time_from_the_start() {
        let mut form = NewSleepForm::new(datetime!(2026-03-02 12:00 UTC));
        form.start_input = TextInput::from_str("14:00");
        form.apply_preset(0);
        assert_eq!(form.end_input.value, "14:30");

        form.kind = SleepKind::Night;
        form.start_input = TextInput::from_str("20:00");
        form.apply_preset(2);
        assert_eq!(form.end_input.value, "08:00");
    }

    #[test]
    fn preview_tracks_rollover_and_band() {
        let mut form = NewSleepForm::new(datetime!(2026-03-02 12:00 UTC));
        form.kind = SleepKind::Night;
        form.start_input = TextInput::from_str("22:00");
        form.end_input = TextInput::from_str("06:00");
        assert_eq!(form.duration_preview(), Some((480, RangeFit::Within)));

        form.end_input = TextInput::from_str("23:00");
        assert_eq!(form.duration_preview(), Some((60, RangeFit::Below)));
    }

    #[test]
    fn validate_requires_a_parseable_start() {
        let now = datetime!(2026-03-02 12:00 UTC);
        let mut form = NewSleepForm::new(now);
        form.start_input = TextInput::from_str("9:0");
        assert!(form.validate(now).is_err());

        form.start_input = TextInput::from_str("09:00");
        let candidate = form.validate(now).expect("valid form");
        assert_eq!(candidate.started_at, datetime!(2026-03-02 09:00 UTC));
        assert!(candidate.ended_at.is_none());
    }

    #[test]
    fn feeding_validate_coerces_numbers() {
        let now = datetime!(2026-03-02 12:00 UTC);
        let mut form = NewFeedingForm::new(now);
        form.kind = FeedingKind::Bottle;
        form.duration_input = TextInput::from_str("15");
        form.amount_input = TextInput::from_str("3.5");

        let candidate = form.validate(now).expect("valid form");
        assert_eq!(candidate.duration_minutes, 15);
        assert_eq!(candidate.amount_oz, Some(3.5));
        assert_eq!(candidate.fed_at, datetime!(2026-03-02 12:00 UTC));

        form.duration_input = TextInput::from_str("0");
        assert!(form.validate(now).is_err());
    }
}
