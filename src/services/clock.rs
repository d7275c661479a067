//! Clock-in and clock-out.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::TimeclockResult;
use crate::models::{PunchMetadata, Shift};
use crate::ports::Clock;
use crate::store::ShiftStore;

use super::{LatenessDetector, TransitionScheduler};

/// Starts and finishes shifts.
#[derive(Clone)]
pub struct ClockService {
    store: Arc<dyn ShiftStore>,
    clock: Arc<dyn Clock>,
    lateness: LatenessDetector,
    transitions: TransitionScheduler,
}

impl ClockService {
    /// Creates a clock service.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        clock: Arc<dyn Clock>,
        lateness: LatenessDetector,
        transitions: TransitionScheduler,
    ) -> Self {
        Self {
            store,
            clock,
            lateness,
            transitions,
        }
    }

    /// Clocks a pending shift in.
    ///
    /// Fails with `StateConflict` unless the shift is pending, and with
    /// `DuplicateActiveShift` if the employee already has a running shift
    /// that day. After clocking in, the shift is checked for lateness (unless
    /// the system started it) and, if a contiguous pending shift follows it,
    /// the automatic handoff is arranged.
    pub fn start(&self, shift_id: &str, punch: PunchMetadata) -> TimeclockResult<Shift> {
        let now = self.clock.now();
        let actor = punch.actor.clone();
        let shift = self.store.clock_in(shift_id, now, punch)?;
        info!(
            shift_id = %shift.id,
            employee_id = %shift.employee_id,
            clock_in = %now,
            system = actor.is_system(),
            "Shift started"
        );

        // Automatic handoffs start on the system's schedule, not the employee's.
        if actor.is_system() {
            debug!(shift_id = %shift.id, "System clock-in, lateness check skipped");
        } else if let Err(error) = self.lateness.check(&shift) {
            // The shift is already started; lateness bookkeeping must not undo that.
            warn!(shift_id = %shift.id, error = %error, "Lateness check failed");
        }

        self.arrange_successor(&shift);
        Ok(shift)
    }

    /// Clocks a running shift out, closing any open break.
    ///
    /// Fails with `AlreadyFinished` for finished shifts and `StateConflict`
    /// for shifts that were never started.
    pub fn finish(&self, shift_id: &str, punch: PunchMetadata) -> TimeclockResult<Shift> {
        let now = self.clock.now();
        let actor = punch.actor.clone();
        let shift = self.store.clock_out(shift_id, now, punch)?;
        info!(
            shift_id = %shift.id,
            employee_id = %shift.employee_id,
            clock_out = %now,
            system = actor.is_system(),
            "Shift finished"
        );
        Ok(shift)
    }

    fn arrange_successor(&self, shift: &Shift) {
        let Some(next) = self.store.find_successor(shift) else {
            return;
        };

        if let Err(error) = self.transitions.arrange(shift, &next) {
            warn!(
                shift_id = %shift.id,
                next_shift_id = %next.id,
                error = %error,
                "Could not arrange shift transition"
            );
        }
    }
}
