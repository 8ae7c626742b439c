//! Scheduled transitions keyed to the simulation clock
//!
//! Replaces fire-and-forget wall-clock timeouts: every scheduled entry has a
//! handle that can cancel it, and entries only fire when the owner drains the
//! queue at a tick boundary.

use serde::{Deserialize, Serialize};

/// Handle returned by `TimerQueue::schedule`, used to cancel the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

/// A deferred state change for the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// Pause is over: dash toward the player
    BeginDash,
    /// Cooldown is over: go back to bursts
    EndCooldown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    handle: TimerHandle,
    deadline: f64,
    transition: Transition,
}

/// Pending transitions ordered by deadline (ties fire in scheduling order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    entries: Vec<Scheduled>,
    next_handle: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `transition` to fire once the clock reaches `deadline`
    pub fn schedule(&mut self, deadline: f64, transition: Transition) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        // Insert after every entry with deadline <= ours to keep FIFO among ties
        let idx = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(
            idx,
            Scheduled {
                handle,
                deadline,
                transition,
            },
        );
        handle
    }

    /// Cancel a pending entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.entries.iter().position(|e| e.handle == handle) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove and return every transition due at `now`, in firing order
    pub fn drain_due(&mut self, now: f64) -> Vec<(TimerHandle, Transition)> {
        let due = self.entries.partition_point(|e| e.deadline <= now);
        self.entries
            .drain(..due)
            .map(|e| (e.handle, e.transition))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything pending
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
