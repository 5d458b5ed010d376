//! Transient insertion feedback.
//!
//! A drop shows a success or error indicator that clears itself after a
//! fixed duration. The clear is a scheduled callback identified by a
//! [`FeedbackHandle`]: showing new feedback supersedes the old handle, so a
//! stale clear can never wipe feedback that was set after it was scheduled.
//!
//! Two ways to drive the clear:
//! - poll [`FeedbackSlot::tick`] with the current time from the UI loop, or
//! - schedule a host timer and call [`FeedbackSlot::expire`] with the handle.

use crate::constants::FEEDBACK_DURATION_MS;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::trace;

/// Outcome being reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    /// Zone that received the drop, if any
    pub zone_id: Option<String>,
    pub shown_at: Instant,
}

/// Identifies one scheduled clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackHandle(u64);

#[derive(Debug, Clone, Copy)]
struct PendingClear {
    handle: FeedbackHandle,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct FeedbackSlot {
    current: Option<Feedback>,
    pending: Option<PendingClear>,
    generation: u64,
    duration: Duration,
}

impl Default for FeedbackSlot {
    fn default() -> Self {
        Self::new(Duration::from_millis(FEEDBACK_DURATION_MS))
    }
}

impl FeedbackSlot {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            pending: None,
            generation: 0,
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// When the pending clear is due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Show feedback now and schedule its clear. Supersedes any earlier handle.
    pub fn show(&mut self, kind: FeedbackKind, zone_id: Option<String>, now: Instant) -> FeedbackHandle {
        self.generation += 1;
        let handle = FeedbackHandle(self.generation);
        trace!(?kind, zone = ?zone_id, generation = self.generation, "Feedback shown");
        self.current = Some(Feedback {
            kind,
            zone_id,
            shown_at: now,
        });
        self.pending = Some(PendingClear {
            handle,
            due: now + self.duration,
        });
        handle
    }

    /// Cancel a scheduled clear. The feedback stays until replaced or cleared.
    pub fn cancel(&mut self, handle: FeedbackHandle) -> bool {
        match self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Run the clear for `handle` immediately. Stale or cancelled handles do nothing.
    pub fn expire(&mut self, handle: FeedbackHandle) -> bool {
        match self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Run the pending clear if it is due. Returns true if feedback was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(p) if p.due <= now => self.expire(p.handle),
            _ => false,
        }
    }

    /// Clear immediately and drop any pending clear.
    pub fn clear(&mut self) {
        self.current = None;
        self.pending = None;
    }
}
