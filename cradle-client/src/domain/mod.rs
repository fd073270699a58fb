mod feeding;
mod sleep;

pub use feeding::{FeedingEntry, FeedingKind, FeedingPatch, NewFeeding};
pub use sleep::{NewSleep, SleepEntry, SleepKind, SleepPatch};
