//! Automatic handoff between contiguous shifts.
//!
//! When a shift starts and another shift of the same employee begins exactly
//! when it ends, the [`TransitionScheduler`] queues a [`TransitionJob`] for
//! the boundary instant. The [`TransitionHandler`] later runs the job against
//! fresh store state: it is a guard plus two ordinary clock actions taken by
//! [`Actor::System`](crate::models::Actor::System), so redelivering the job
//! is harmless. A job delivered before its boundary is reported as
//! [`TransitionOutcome::NotDue`] and changes nothing.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{TimeclockError, TimeclockResult};
use crate::jobs::{JobQueue, TransitionJob};
use crate::models::{PunchMetadata, Shift, ShiftState};
use crate::ports::Clock;
use crate::store::ShiftStore;

use super::ClockService;

/// Queues transition jobs.
#[derive(Clone)]
pub struct TransitionScheduler {
    clock: Arc<dyn Clock>,
    queue: Arc<dyn JobQueue>,
}

impl TransitionScheduler {
    /// Creates a scheduler that enqueues onto `queue`.
    pub fn new(clock: Arc<dyn Clock>, queue: Arc<dyn JobQueue>) -> Self {
        Self { clock, queue }
    }

    /// Arranges for `current` to be finished and `next` started at the boundary.
    ///
    /// Fails with `NotContiguous` unless `next` starts exactly when `current`
    /// is scheduled to end. A boundary already in the past runs immediately.
    pub fn arrange(&self, current: &Shift, next: &Shift) -> TimeclockResult<TransitionJob> {
        if !current.is_contiguous_with(next) {
            return Err(TimeclockError::NotContiguous {
                current_shift_id: current.id.clone(),
                next_shift_id: next.id.clone(),
            });
        }

        let delay = (current.scheduled_end - self.clock.now()).max(Duration::zero());
        let job = TransitionJob {
            id: Uuid::new_v4(),
            current_shift_id: current.id.clone(),
            next_shift_id: next.id.clone(),
            fire_at: current.scheduled_end,
        };

        info!(
            job_id = %job.id,
            current_shift_id = %job.current_shift_id,
            next_shift_id = %job.next_shift_id,
            fire_at = %job.fire_at,
            delay_secs = delay.num_seconds(),
            "Shift transition arranged"
        );
        self.queue
            .enqueue(job.clone(), delay.to_std().unwrap_or_default());
        Ok(job)
    }
}

/// Result of running one transition job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// The current shift was finished and the next one started.
    Completed {
        /// The shift that was finished.
        finished_shift_id: String,
        /// The shift that was started.
        started_shift_id: String,
    },
    /// The boundary has not been reached yet; nothing was changed.
    NotDue {
        /// When the job becomes due.
        fire_at: NaiveDateTime,
        /// Seconds left until `fire_at`.
        wait_seconds: i64,
    },
    /// Nothing to do; the current shift had already been finished.
    Skipped {
        /// The shift that was already finished.
        shift_id: String,
    },
    /// The transition could not be carried out; the employee clocks in manually.
    Failed {
        /// Why the transition failed.
        reason: String,
    },
}

/// Executes transition jobs.
#[derive(Clone)]
pub struct TransitionHandler {
    store: Arc<dyn ShiftStore>,
    clock: Arc<dyn Clock>,
    clock_service: ClockService,
}

impl TransitionHandler {
    /// Creates a handler acting through `clock_service`.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        clock: Arc<dyn Clock>,
        clock_service: ClockService,
    ) -> Self {
        Self {
            store,
            clock,
            clock_service,
        }
    }

    /// Runs a job. Never fails; failures are logged and reported as
    /// [`TransitionOutcome::Failed`]. Callers redeliver a
    /// [`TransitionOutcome::NotDue`] job once its wait has elapsed.
    pub fn handle(&self, job: &TransitionJob) -> TransitionOutcome {
        match self.try_handle(job) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    job_id = %job.id,
                    current_shift_id = %job.current_shift_id,
                    next_shift_id = %job.next_shift_id,
                    error = %error,
                    "Automatic shift transition failed"
                );
                TransitionOutcome::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }

    fn try_handle(&self, job: &TransitionJob) -> TimeclockResult<TransitionOutcome> {
        let current = self.store.get_shift(&job.current_shift_id)?;
        let next = self.store.get_shift(&job.next_shift_id)?;

        if current.state == ShiftState::Finished {
            info!(
                job_id = %job.id,
                shift_id = %current.id,
                "Shift already finished, skipping transition"
            );
            return Ok(TransitionOutcome::Skipped {
                shift_id: current.id,
            });
        }
        let now = self.clock.now();
        if now < job.fire_at {
            let wait_seconds = (job.fire_at - now).num_seconds();
            info!(
                job_id = %job.id,
                fire_at = %job.fire_at,
                wait_seconds,
                "Transition delivered early, not due yet"
            );
            return Ok(TransitionOutcome::NotDue {
                fire_at: job.fire_at,
                wait_seconds,
            });
        }
        if !current.is_contiguous_with(&next) {
            return Err(TimeclockError::NotContiguous {
                current_shift_id: current.id,
                next_shift_id: next.id,
            });
        }

        // Finishing first frees the employee's active slot for `next`.
        let finished = self.clock_service.finish(&current.id, PunchMetadata::system())?;
        let started = self.clock_service.start(&next.id, PunchMetadata::system())?;

        info!(
            job_id = %job.id,
            finished_shift_id = %finished.id,
            started_shift_id = %started.id,
            "Automatic shift transition completed"
        );
        Ok(TransitionOutcome::Completed {
            finished_shift_id: finished.id,
            started_shift_id: started.id,
        })
    }
}
