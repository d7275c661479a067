//! Job queue that only records what was scheduled.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use super::{JobQueue, ScheduledJob, TransitionJob};

/// Records scheduled jobs so a test or an external worker can run them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobQueue {
    jobs: Arc<Mutex<Vec<ScheduledJob>>>,
}

impl InMemoryJobQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs scheduled and not yet drained.
    pub fn pending(&self) -> Vec<ScheduledJob> {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every scheduled job.
    pub fn drain(&self) -> Vec<ScheduledJob> {
        std::mem::take(&mut *self.jobs.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl JobQueue for InMemoryJobQueue {
    fn enqueue(&self, job: TransitionJob, delay: Duration) {
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ScheduledJob { job, delay });
    }
}
