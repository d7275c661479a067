//! Mandatory and supplemental breaks.

use std::sync::Arc;

use tracing::{info, warn};

use crate::calculation::total_worked_time;
use crate::config::BreakPolicy;
use crate::error::{TimeclockError, TimeclockResult};
use crate::models::{PunchMetadata, Shift, ShiftState};
use crate::ports::Clock;
use crate::store::ShiftStore;

/// Starts and stops breaks, enforcing the break policy.
#[derive(Clone)]
pub struct BreakManager {
    store: Arc<dyn ShiftStore>,
    clock: Arc<dyn Clock>,
    policy: BreakPolicy,
}

impl BreakManager {
    /// Creates a break manager.
    pub fn new(store: Arc<dyn ShiftStore>, clock: Arc<dyn Clock>, policy: BreakPolicy) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// True if the shift is active, has worked past the mandatory-break
    /// trigger, and has not taken its mandatory break yet.
    pub fn can_start_mandatory(&self, shift: &Shift) -> bool {
        self.mandatory_refusal(shift).is_none()
    }

    /// True if the shift is active and the employee has supplemental breaks
    /// left for the day.
    pub fn can_start_supplemental(&self, shift: &Shift) -> bool {
        self.supplemental_refusal(shift).is_none()
    }

    /// Pauses an active shift for a break.
    pub fn start_break(
        &self,
        shift_id: &str,
        punch: PunchMetadata,
        mandatory: bool,
    ) -> TimeclockResult<Shift> {
        let shift = self.store.get_shift(shift_id)?;
        let refusal = if mandatory {
            self.mandatory_refusal(&shift)
        } else {
            self.supplemental_refusal(&shift)
        };
        if let Some(reason) = refusal {
            warn!(shift_id = %shift.id, mandatory, reason = %reason, "Break refused");
            return Err(TimeclockError::BreakNotAllowed {
                shift_id: shift.id,
                reason,
            });
        }

        let now = self.clock.now();
        let paused = if mandatory {
            self.store.open_mandatory_break(shift_id, now, punch)?
        } else {
            self.store.open_supplemental_break(shift_id, now, punch)?.0
        };
        info!(shift_id = %paused.id, mandatory, at = %now, "Break started");
        Ok(paused)
    }

    /// Ends whichever break is open and reactivates the shift.
    pub fn finish_break(&self, shift_id: &str, punch: PunchMetadata) -> TimeclockResult<Shift> {
        let now = self.clock.now();
        let resumed = self.store.close_open_break(shift_id, now, punch)?;
        info!(shift_id = %resumed.id, at = %now, "Break finished");
        Ok(resumed)
    }

    fn mandatory_refusal(&self, shift: &Shift) -> Option<String> {
        if shift.state != ShiftState::Active {
            return Some(format!("the shift is {}", shift.state));
        }
        if shift.mandatory_break_taken() {
            return Some("the mandatory break has already been taken".to_string());
        }
        let breaks = self.store.breaks_for_shift(&shift.id);
        let worked = total_worked_time(shift, &breaks, self.clock.now());
        if worked < self.policy.mandatory_trigger() {
            return Some(format!(
                "the mandatory break opens after {} worked minutes ({} worked so far)",
                self.policy.mandatory_trigger_minutes,
                worked.num_minutes()
            ));
        }
        None
    }

    fn supplemental_refusal(&self, shift: &Shift) -> Option<String> {
        if shift.state != ShiftState::Active {
            return Some(format!("the shift is {}", shift.state));
        }
        let taken = self
            .store
            .supplemental_breaks_on(&shift.employee_id, shift.date());
        if taken >= self.policy.supplemental_daily_quota {
            return Some(format!(
                "the daily quota of {} supplemental breaks has been used",
                self.policy.supplemental_daily_quota
            ));
        }
        None
    }
}
