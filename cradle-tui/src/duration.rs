use cradle_client::SleepKind;
use time::{Duration, Time};

/// Advisory duration band for a sleep kind. Display-only, never blocks a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFit {
    Below,
    Within,
    Above,
}

#[derive(Debug, Clone, Copy)]
pub struct RecommendedRange {
    pub min_minutes: i64,
    pub max_minutes: i64,
}

pub const NAP_RANGE: RecommendedRange = RecommendedRange {
    min_minutes: 20,
    max_minutes: 180,
};

pub const NIGHT_RANGE: RecommendedRange = RecommendedRange {
    min_minutes: 420,
    max_minutes: 780,
};

pub fn recommended_range(kind: SleepKind) -> RecommendedRange {
    match kind {
        SleepKind::Nap => NAP_RANGE,
        SleepKind::Night => NIGHT_RANGE,
    }
}

/// Whole minutes between two wall-clock times. An end clock earlier than the
/// start clock means the sleep ran past midnight, so a full day is added
/// before differencing. Always >= 0.
pub fn elapsed_minutes(start: Time, end: Time) -> i64 {
    let start_minutes = i64::from(start.hour()) * 60 + i64::from(start.minute());
    let end_minutes = i64::from(end.hour()) * 60 + i64::from(end.minute());
    if end_minutes < start_minutes {
        24 * 60 - start_minutes + end_minutes
    } else {
        end_minutes - start_minutes
    }
}

/// Band a duration against the recommended range for its sleep kind.
/// Boundaries are inclusive. Feedings are never banded.
pub fn classify(minutes: i64, kind: SleepKind) -> RangeFit {
    let range = recommended_range(kind);
    if minutes < range.min_minutes {
        RangeFit::Below
    } else if minutes > range.max_minutes {
        RangeFit::Above
    } else {
        RangeFit::Within
    }
}

/// A named end-time offset shown as a quick pick when composing a sleep.
#[derive(Debug, Clone, Copy)]
pub struct EndOffset {
    pub hours: u8,
    pub minutes: u8,
    pub label: &'static str,
}

pub const NAP_PRESETS: [EndOffset; 4] = [
    EndOffset {
        hours: 0,
        minutes: 30,
        label: "30m",
    },
    EndOffset {
        hours: 1,
        minutes: 0,
        label: "1h",
    },
    EndOffset {
        hours: 1,
        minutes: 30,
        label: "1h30",
    },
    EndOffset {
        hours: 2,
        minutes: 0,
        label: "2h",
    },
];

pub const NIGHT_PRESETS: [EndOffset; 3] = [
    EndOffset {
        hours: 8,
        minutes: 0,
        label: "8h",
    },
    EndOffset {
        hours: 10,
        minutes: 0,
        label: "10h",
    },
    EndOffset {
        hours: 12,
        minutes: 0,
        label: "12h",
    },
];

pub fn presets_for(kind: SleepKind) -> &'static [EndOffset] {
    match kind {
        SleepKind::Nap => &NAP_PRESETS,
        SleepKind::Night => &NIGHT_PRESETS,
    }
}

/// Add an offset to a start clock. Wraps past midnight; callers display only
/// the clock portion.
pub fn apply_offset(start: Time, hours: u8, minutes: u8) -> Time {
    start + Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes))
}

/// One suggested end time per preset, preset order preserved.
pub fn suggested_end_times(start: Time, presets: &[EndOffset]) -> Vec<Time> {
    presets
        .iter()
        .map(|preset| apply_offset(start, preset.hours, preset.minutes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn elapsed_same_day() {
        assert_eq!(elapsed_minutes(time!(9:00), time!(10:10)), 70);
        assert_eq!(elapsed_minutes(time!(0:00), time!(0:00)), 0);
    }

    #[test]
    fn elapsed_rolls_over_midnight() {
        // End before start means the end fell on the following day.
        assert_eq!(elapsed_minutes(time!(22:00), time!(6:00)), 480);
        assert_eq!(elapsed_minutes(time!(23:59), time!(0:01)), 2);
    }

    #[test]
    fn elapsed_is_never_negative() {
        for start_h in [0u8, 6, 12, 18, 23] {
            for end_h in [0u8, 6, 12, 18, 23] {
                let start = Time::from_hms(start_h, 30, 0).unwrap();
                let end = Time::from_hms(end_h, 15, 0).unwrap();
                assert!(elapsed_minutes(start, end) >= 0);
            }
        }
    }

    #[test]
    fn overnight_sleep_lands_within_night_range() {
        let minutes = elapsed_minutes(time!(22:00), time!(6:00));
        assert_eq!(minutes, 480);
        assert_eq!(classify(minutes, SleepKind::Night), RangeFit::Within);
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        assert_eq!(classify(19, SleepKind::Nap), RangeFit::Below);
        assert_eq!(classify(20, SleepKind::Nap), RangeFit::Within);
        assert_eq!(classify(180, SleepKind::Nap), RangeFit::Within);
        assert_eq!(classify(181, SleepKind::Nap), RangeFit::Above);

        assert_eq!(classify(419, SleepKind::Night), RangeFit::Below);
        assert_eq!(classify(420, SleepKind::Night), RangeFit::Within);
        assert_eq!(classify(780, SleepKind::Night), RangeFit::Within);
        assert_eq!(classify(781, SleepKind::Night), RangeFit::Above);
    }

    #[test]
    fn offsets_wrap_past_midnight() {
        assert_eq!(apply_offset(time!(14:00), 0, 30), time!(14:30));
        assert_eq!(apply_offset(time!(23:00), 2, 0), time!(1:00));
    }

    #[test]
    fn suggestions_preserve_preset_order() {
        let ends = suggested_end_times(time!(13:00), &NAP_PRESETS);
        assert_eq!(
            ends,
            vec![time!(13:30), time!(14:00), time!(14:30), time!(15:00)]
        );

        let night_ends = suggested_end_times(time!(19:30), &NIGHT_PRESETS);
        assert_eq!(night_ends, vec![time!(3:30), time!(5:30), time!(7:30)]);
    }
}
