use std::sync::{Arc, Mutex};

use time::macros::offset;
use time::{Duration, OffsetDateTime, Time};

use crate::client::StoreError;
use crate::domain::{
    FeedingEntry, FeedingKind, FeedingPatch, NewFeeding, NewSleep, SleepEntry, SleepKind,
    SleepPatch,
};

/// In-memory stand-in for the record service, used by `cradle-tui dev` and
/// by tests. Shares one store across clones so refreshes observe writes.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    feedings: Vec<FeedingEntry>,
    sleeps: Vec<SleepEntry>,
    next_id: i64,
}

impl DevBackend {
    pub fn new() -> Self {
        let (feedings, sleeps) = seed_records();
        let next_id = 100;
        Self {
            store: Arc::new(Mutex::new(DevStore {
                feedings,
                sleeps,
                next_id,
            })),
        }
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut DevStore) -> T) -> T {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        f(&mut store)
    }

    pub fn feedings(&self) -> Vec<FeedingEntry> {
        self.with_store(|s| s.feedings.clone())
    }

    pub fn sleeps(&self) -> Vec<SleepEntry> {
        self.with_store(|s| s.sleeps.clone())
    }

    pub fn create_feeding(&self, candidate: &NewFeeding) -> Result<FeedingEntry, StoreError> {
        if candidate.duration_minutes < 1 {
            return Err(StoreError::Validation(
                "duration must be at least one minute".to_string(),
            ));
        }
        self.with_store(|s| {
            let entry = FeedingEntry {
                id: s.next_id,
                fed_at: candidate.fed_at,
                kind: candidate.kind,
                duration_minutes: candidate.duration_minutes,
                amount_oz: candidate.amount_oz,
                notes: candidate.notes.clone(),
            };
            s.next_id += 1;
            s.feedings.push(entry.clone());
            Ok(entry)
        })
    }

    pub fn update_feeding(&self, id: i64, patch: &FeedingPatch) -> Result<FeedingEntry, StoreError> {
        if patch.duration_minutes.is_some_and(|d| d < 1) {
            return Err(StoreError::Validation(
                "duration must be at least one minute".to_string(),
            ));
        }
        self.with_store(|s| {
            let entry = s
                .feedings
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(StoreError::NotFound)?;
            if let Some(kind) = patch.kind {
                entry.kind = kind;
            }
            if let Some(duration) = patch.duration_minutes {
                entry.duration_minutes = duration;
            }
            if let Some(amount) = patch.amount_oz {
                entry.amount_oz = amount;
            }
            if let Some(notes) = &patch.notes {
                entry.notes = notes.clone();
            }
            Ok(entry.clone())
        })
    }

    pub fn delete_feeding(&self, id: i64) -> Result<(), StoreError> {
        self.with_store(|s| {
            let before = s.feedings.len();
            s.feedings.retain(|e| e.id != id);
            if s.feedings.len() == before {
                Err(StoreError::NotFound)
            } else {
                Ok(())
            }
        })
    }

    pub fn create_sleep(&self, candidate: &NewSleep) -> Result<SleepEntry, StoreError> {
        self.with_store(|s| {
            let entry = SleepEntry {
                id: s.next_id,
                started_at: candidate.started_at,
                ended_at: candidate.ended_at,
                kind: candidate.kind,
                notes: candidate.notes.clone(),
            };
            s.next_id += 1;
            s.sleeps.push(entry.clone());
            Ok(entry)
        })
    }

    pub fn update_sleep(&self, id: i64, patch: &SleepPatch) -> Result<SleepEntry, StoreError> {
        self.with_store(|s| {
            let entry = s
                .sleeps
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or(StoreError::NotFound)?;
            if let Some(started_at) = patch.started_at {
                entry.started_at = started_at;
            }
            if let Some(ended_at) = patch.ended_at {
                entry.ended_at = Some(ended_at);
            }
            if let Some(kind) = patch.kind {
                entry.kind = kind;
            }
            if let Some(notes) = &patch.notes {
                entry.notes = notes.clone();
            }
            Ok(entry.clone())
        })
    }

    pub fn delete_sleep(&self, id: i64) -> Result<(), StoreError> {
        self.with_store(|s| {
            let before = s.sleeps.len();
            s.sleeps.retain(|e| e.id != id);
            if s.sleeps.len() == before {
                Err(StoreError::NotFound)
            } else {
                Ok(())
            }
        })
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_records() -> (Vec<FeedingEntry>, Vec<SleepEntry>) {
    let now = OffsetDateTime::now_utc().to_offset(offset!(+1));
    let today = now.date();

    let at = |h: u8, m: u8| {
        OffsetDateTime::new_in_offset(
            today,
            Time::from_hms(h, m, 0).expect("valid seed time"),
            offset!(+1),
        )
    };

    let feedings = vec![
        FeedingEntry {
            id: 1,
            fed_at: at(7, 30),
            kind: FeedingKind::Breast,
            duration_minutes: 20,
            amount_oz: None,
            notes: Some("sleepy feed".to_string()),
        },
        FeedingEntry {
            id: 2,
            fed_at: at(10, 45),
            kind: FeedingKind::Bottle,
            duration_minutes: 15,
            amount_oz: Some(4.0),
            notes: None,
        },
        FeedingEntry {
            id: 3,
            fed_at: at(13, 15),
            kind: FeedingKind::Solids,
            duration_minutes: 25,
            amount_oz: None,
            notes: Some("sweet potato".to_string()),
        },
    ];

    let sleeps = vec![
        SleepEntry {
            id: 10,
            started_at: at(9, 0),
            ended_at: Some(at(10, 10)),
            kind: SleepKind::Nap,
            notes: None,
        },
        SleepEntry {
            id: 11,
            started_at: at(12, 30),
            ended_at: Some(at(14, 0)),
            kind: SleepKind::Nap,
            notes: Some("stroller nap".to_string()),
        },
        SleepEntry {
            // Overnight: the stored end clock precedes the start clock and
            // the display layer infers the day rollover.
            id: 12,
            started_at: at(19, 45) - Duration::days(1),
            ended_at: Some(at(6, 20)),
            kind: SleepKind::Night,
            notes: None,
        },
    ];

    (feedings, sleeps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_feeding_changes_one_field_and_list_reflects_it() {
        let dev = DevBackend::new();
        let patch = FeedingPatch {
            duration_minutes: Some(45),
            ..Default::default()
        };

        let updated = dev.update_feeding(1, &patch).expect("update succeeds");
        assert_eq!(updated.duration_minutes, 45);
        // Untouched fields survive.
        assert_eq!(updated.kind, FeedingKind::Breast);

        let listed = dev.feedings();
        let entry = listed.iter().find(|e| e.id == 1).expect("entry listed");
        assert_eq!(entry.duration_minutes, 45);
    }

    #[test]
    fn update_unknown_feeding_is_not_found() {
        let dev = DevBackend::new();
        let patch = FeedingPatch {
            duration_minutes: Some(10),
            ..Default::default()
        };
        assert!(matches!(
            dev.update_feeding(999, &patch),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        let dev = DevBackend::new();
        let patch = FeedingPatch {
            duration_minutes: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            dev.update_feeding(1, &patch),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn create_assigns_fresh_ids() {
        let dev = DevBackend::new();
        let candidate = NewSleep {
            started_at: OffsetDateTime::now_utc(),
            ended_at: None,
            kind: SleepKind::Nap,
            notes: None,
        };
        let a = dev.create_sleep(&candidate).expect("create succeeds");
        let b = dev.create_sleep(&candidate).expect("create succeeds");
        assert_ne!(a.id, b.id);
        assert_eq!(dev.sleeps().len(), 5);
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let dev = DevBackend::new();
        dev.delete_feeding(2).expect("delete succeeds");
        assert!(dev.feedings().iter().all(|e| e.id != 2));
        assert!(matches!(dev.delete_feeding(2), Err(StoreError::NotFound)));
    }
}
