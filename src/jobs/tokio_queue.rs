//! Job queue backed by tokio tasks.
//!
//! [`TokioJobQueue`] is the sending half: services enqueue onto it
//! synchronously. [`spawn_transition_worker`] owns the receiving half and
//! runs each job on its own task once its delay has elapsed, decoupled from
//! the request that scheduled it. A job that wakes before the domain clock
//! reaches its boundary sleeps again for the remaining time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::services::{TransitionHandler, TransitionOutcome};

use super::{JobQueue, ScheduledJob, TransitionJob};

/// Sends scheduled jobs to a transition worker.
#[derive(Debug, Clone)]
pub struct TokioJobQueue {
    sender: mpsc::UnboundedSender<ScheduledJob>,
}

impl TokioJobQueue {
    /// Creates a queue and the receiver to hand to [`spawn_transition_worker`].
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ScheduledJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl JobQueue for TokioJobQueue {
    fn enqueue(&self, job: TransitionJob, delay: Duration) {
        let job_id = job.id;
        if self.sender.send(ScheduledJob { job, delay }).is_err() {
            warn!(job_id = %job_id, "Transition worker is gone, job dropped");
        }
    }
}

/// Runs every received job after its delay, each on its own task.
///
/// The worker stops once every [`TokioJobQueue`] clone has been dropped;
/// jobs already waiting keep running.
pub fn spawn_transition_worker(
    mut receiver: mpsc::UnboundedReceiver<ScheduledJob>,
    handler: TransitionHandler,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ScheduledJob { job, delay }) = receiver.recv().await {
            debug!(job_id = %job.id, delay_secs = delay.as_secs(), "Transition job received");
            let handler = handler.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                while let TransitionOutcome::NotDue { wait_seconds, .. } = handler.handle(&job) {
                    let wait = Duration::from_secs(wait_seconds.max(1).unsigned_abs());
                    debug!(job_id = %job.id, wait_secs = wait.as_secs(), "Transition job not due, waiting");
                    tokio::time::sleep(wait).await;
                }
            });
        }
        debug!("Transition worker stopped");
    })
}
