//! Delayed background jobs.
//!
//! The only delayed job is the automatic handoff between two contiguous
//! shifts. A job is a plain message naming both shifts; whoever executes it
//! must re-read the shifts and re-validate before acting, because delivery
//! is at-least-once and there is no cancellation.

mod memory;
mod tokio_queue;

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use memory::InMemoryJobQueue;
pub use tokio_queue::{TokioJobQueue, spawn_transition_worker};

/// Automatically finish one shift and start the next at `fire_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionJob {
    /// Unique job ID, for log correlation across redeliveries.
    pub id: Uuid,
    /// The shift to finish.
    pub current_shift_id: String,
    /// The shift to start.
    pub next_shift_id: String,
    /// The boundary instant the job is meant to run at.
    pub fire_at: NaiveDateTime,
}

/// A job together with how long to wait before running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledJob {
    /// The job.
    pub job: TransitionJob,
    /// Wait before running.
    pub delay: Duration,
}

/// Queue accepting delayed one-shot jobs.
pub trait JobQueue: Send + Sync {
    /// Schedules `job` to run once `delay` has elapsed.
    fn enqueue(&self, job: TransitionJob, delay: Duration);
}
