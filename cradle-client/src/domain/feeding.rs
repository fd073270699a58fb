use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How the baby was fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedingKind {
    Breast,
    Bottle,
    Solids,
}

impl FeedingKind {
    pub const ALL: [FeedingKind; 3] = [
        FeedingKind::Breast,
        FeedingKind::Bottle,
        FeedingKind::Solids,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FeedingKind::Breast => "breast",
            FeedingKind::Bottle => "bottle",
            FeedingKind::Solids => "solids",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "breast" => Some(FeedingKind::Breast),
            "bottle" => Some(FeedingKind::Bottle),
            "solids" => Some(FeedingKind::Solids),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            FeedingKind::Breast => FeedingKind::Bottle,
            FeedingKind::Bottle => FeedingKind::Solids,
            FeedingKind::Solids => FeedingKind::Breast,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FeedingKind::Breast => FeedingKind::Solids,
            FeedingKind::Bottle => FeedingKind::Breast,
            FeedingKind::Solids => FeedingKind::Bottle,
        }
    }
}

/// A logged feeding as returned by the record service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingEntry {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub fed_at: OffsetDateTime,
    pub kind: FeedingKind,
    pub duration_minutes: i64,
    /// Ounces consumed. Meaningful only for bottle feedings.
    pub amount_oz: Option<f64>,
    pub notes: Option<String>,
}

/// Creation candidate: a feeding without a server-assigned id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeeding {
    #[serde(with = "time::serde::rfc3339")]
    pub fed_at: OffsetDateTime,
    pub kind: FeedingKind,
    pub duration_minutes: i64,
    pub amount_oz: Option<f64>,
    pub notes: Option<String>,
}

/// Single-field update. Only the populated field is serialized, so one
/// patch changes exactly one column of one record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FeedingKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// `Some(None)` clears the stored amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_oz: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}
