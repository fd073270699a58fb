use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepKind {
    Nap,
    Night,
}

impl SleepKind {
    pub fn label(self) -> &'static str {
        match self {
            SleepKind::Nap => "nap",
            SleepKind::Night => "night",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "nap" => Some(SleepKind::Nap),
            "night" => Some(SleepKind::Night),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SleepKind::Nap => SleepKind::Night,
            SleepKind::Night => SleepKind::Nap,
        }
    }
}

/// A logged sleep as returned by the record service.
///
/// `ended_at` stays empty while a sleep is still open. A stored end clock
/// earlier than the start clock is valid data: the display layer treats it
/// as ending on the following day.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    pub kind: SleepKind,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSleep {
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at: Option<OffsetDateTime>,
    pub kind: SleepKind,
    pub notes: Option<String>,
}

/// Single-field update for a sleep record. End times are set, never cleared,
/// through this path; reopening a sleep is not an inline-edit operation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepPatch {
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub started_at: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<SleepKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}
