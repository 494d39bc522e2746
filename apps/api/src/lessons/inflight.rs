//! Guards against double-submitting a generation for the same student.
//!
//! At most one generation per student runs at a time. The guard releases
//! its slot when dropped, on success and error paths alike.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InFlightRegistry {
    active: Arc<Mutex<HashSet<Uuid>>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `student_id`. Returns `None` if a generation for
    /// this student is already running.
    pub fn try_acquire(&self, student_id: Uuid) -> Option<InFlightGuard> {
        if !lock(&self.active).insert(student_id) {
            return None;
        }
        Some(InFlightGuard {
            active: Arc::clone(&self.active),
            student_id,
        })
    }
}

/// Releases its student's slot on drop.
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<Uuid>>>,
    student_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.active).remove(&self.student_id);
    }
}

// A panic while holding the lock cannot leave the set half-updated.
fn lock(active: &Mutex<HashSet<Uuid>>) -> MutexGuard<'_, HashSet<Uuid>> {
    active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
