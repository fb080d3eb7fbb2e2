//! Shared identifier types for ledger records.

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned to every stored record.
///
/// Ids are strictly increasing over the lifetime of a data set and are never
/// reused, so a freshly created record always sorts after everything that
/// came before it.
pub type RecordId = u64;

/// Hands out strictly increasing [`RecordId`] values.
///
/// Seeded from the highest id found in the persisted collections at load
/// time, so ids stay monotonic across process restarts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdSequence {
    next: RecordId,
}

impl IdSequence {
    /// Creates a sequence that will hand out ids greater than `highest_seen`.
    pub fn starting_after(highest_seen: RecordId) -> Self {
        Self {
            next: highest_seen + 1,
        }
    }

    pub fn next_id(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Bumps the sequence so it never emits `id` or anything below it.
    pub fn observe(&mut self, id: RecordId) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_after(0)
    }
}

/// Exposes the stable identifier of a stored record.
pub trait Identifiable {
    fn id(&self) -> RecordId;
}
