use time::{Time, UtcOffset};

pub fn to_local_time(dt: time::OffsetDateTime) -> time::OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}

pub fn format_clock(t: Time) -> String {
    format!("{:02}:{:02}", t.hour(), t.minute())
}

/// Parse a strict "HH:MM" wall-clock string.
pub fn parse_clock(s: &str) -> Option<Time> {
    if s.len() != 5 || s.as_bytes().get(2) != Some(&b':') {
        return None;
    }
    let (hours_str, minutes_str) = (&s[..2], &s[3..]);
    let hours: u8 = hours_str.parse().ok()?;
    let minutes: u8 = minutes_str.parse().ok()?;
    Time::from_hms(hours, minutes, 0).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::time;

    #[test]
    fn parses_valid_clocks_and_rejects_garbage() {
        assert_eq!(parse_clock("06:00"), Some(time!(6:00)));
        assert_eq!(parse_clock("23:59"), Some(time!(23:59)));
        assert_eq!(parse_clock("24:00"), None);
        assert_eq!(parse_clock("12:60"), None);
        assert_eq!(parse_clock("1200"), None);
        assert_eq!(parse_clock("ab:cd"), None);
        assert_eq!(parse_clock(""), None);
    }
}
