mod client;
mod dev_backend;
pub mod domain;

pub use client::{CradleClient, StoreError};
pub use dev_backend::DevBackend;
pub use domain::{
    FeedingEntry, FeedingKind, FeedingPatch, NewFeeding, NewSleep, SleepEntry, SleepKind,
    SleepPatch,
};
