//! Presence registry: who is clocked in, and since when.
//!
//! A single mutex guards the whole membership map. Every operation holds it
//! for its entire critical section and none of them perform I/O or await
//! while holding it, so callers on async tasks and plain threads can share
//! one `Arc<PresenceRegistry>`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::identity::UserId;

/// Outcome of a mutating registry call.
///
/// `online` is the member count observed inside the same critical section as
/// the mutation, so acknowledgements never report a count from a different
/// moment than the change they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Whether membership (or, for refresh, the stored timestamp) changed.
    pub changed: bool,
    pub online: usize,
}

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    members: Mutex<HashMap<UserId, Instant>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self {
            members: Mutex::new(HashMap::new()),
        }
    }

    // Every critical section leaves the map valid, so a poisoned lock is safe to reuse.
    fn members(&self) -> MutexGuard<'_, HashMap<UserId, Instant>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clock a user in, or bump their last activity if already present.
    ///
    /// `changed` is true only for a fresh clock-in.
    pub fn mark_active(&self, uid: UserId, now: Instant) -> Transition {
        let mut members = self.members();
        let changed = members.insert(uid, now).is_none();
        Transition {
            changed,
            online: members.len(),
        }
    }

    /// Update the timestamp of an existing member. Never inserts.
    pub fn refresh(&self, uid: &UserId, now: Instant) -> Transition {
        let mut members = self.members();
        let changed = match members.get_mut(uid) {
            Some(ts) => {
                *ts = now;
                true
            }
            None => false,
        };
        Transition {
            changed,
            online: members.len(),
        }
    }

    /// Clock a user out. Absent users are a no-op.
    pub fn mark_inactive(&self, uid: &UserId) -> Transition {
        let mut members = self.members();
        let changed = members.remove(uid).is_some();
        Transition {
            changed,
            online: members.len(),
        }
    }

    pub fn count(&self) -> usize {
        self.members().len()
    }

    pub fn is_active(&self, uid: &UserId) -> bool {
        self.members().contains_key(uid)
    }

    pub fn last_seen(&self, uid: &UserId) -> Option<Instant> {
        self.members().get(uid).copied()
    }

    /// Drop every member. Returns how many were removed.
    ///
    /// Performs no authorization; front ends must check the caller first.
    pub fn clear(&self) -> usize {
        let mut members = self.members();
        let removed = members.len();
        members.clear();
        removed
    }

    /// Evict members idle for strictly longer than `timeout`.
    ///
    /// A member whose age equals `timeout` survives this pass. Timestamps
    /// later than `now` count as age zero. The whole pass runs under one
    /// lock acquisition, so no caller observes a half-swept map. Logging
    /// happens after the lock is released.
    pub fn sweep(&self, now: Instant, timeout: Duration) -> usize {
        let (removed, remaining) = {
            let mut members = self.members();
            let before = members.len();
            members.retain(|_, last| now.saturating_duration_since(*last) <= timeout);
            (before - members.len(), members.len())
        };
        if removed > 0 {
            tracing::debug!(removed, remaining, "presence sweep evicted members");
        }
        removed
    }
}
