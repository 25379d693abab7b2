//! dedup.rs — in-memory record of earthquakes already alerted.
//!
//! Lives for the process lifetime only; a restart may alert again for an event
//! that is still inside the date window.

use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// One real-world earthquake: same calendar day + same province.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventIdentity {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub province: String,
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.day, self.month, self.year, self.province
        )
    }
}

/// Set of identities that already produced an alert. Never pruned.
#[derive(Debug, Default)]
pub struct DedupStore {
    inner: Mutex<HashSet<EventIdentity>>,
}

impl DedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &EventIdentity) -> bool {
        self.inner
            .lock()
            .expect("dedup mutex poisoned")
            .contains(id)
    }

    pub fn add(&self, id: EventIdentity) {
        self.inner.lock().expect("dedup mutex poisoned").insert(id);
    }

    /// Atomic check-and-set. Returns `true` only for the first caller with `id`.
    pub fn insert_if_new(&self, id: EventIdentity) -> bool {
        self.inner.lock().expect("dedup mutex poisoned").insert(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("dedup mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
