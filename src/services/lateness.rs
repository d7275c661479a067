//! Lateness detection after clock-in.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::calculation::{DelayClass, classify_delay, delay_minutes};
use crate::config::LatenessPolicy;
use crate::error::TimeclockResult;
use crate::models::{AbsenceNote, Shift, ShiftEvent};
use crate::ports::{Clock, EventSink};
use crate::store::ShiftStore;

/// What the detector did for one shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LatenessOutcome {
    /// Nothing to check: not clocked in, or the absence note is already approved.
    Skipped,
    /// Within the tolerated delay.
    OnTime {
        /// Minutes late.
        delay_minutes: i64,
    },
    /// A significant-delay event was emitted.
    SignificantDelay {
        /// Minutes late.
        delay_minutes: i64,
    },
    /// An absence note exists and a major-absence event was emitted.
    MajorAbsence {
        /// Minutes late.
        delay_minutes: i64,
        /// The shift's absence note.
        absence_note: AbsenceNote,
        /// Whether this run created the note.
        note_created: bool,
    },
}

/// Classifies clock-in delay and records its consequences.
///
/// Running the detector more than once for the same shift never creates a
/// second absence note.
#[derive(Clone)]
pub struct LatenessDetector {
    store: Arc<dyn ShiftStore>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
    policy: LatenessPolicy,
}

impl LatenessDetector {
    /// Creates a detector.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
        policy: LatenessPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            events,
            policy,
        }
    }

    /// Checks a clocked-in shift for lateness.
    pub fn check(&self, shift: &Shift) -> TimeclockResult<LatenessOutcome> {
        let Some(clock_in) = shift.clock_in else {
            return Ok(LatenessOutcome::Skipped);
        };
        if self
            .store
            .absence_note_for(&shift.id)
            .is_some_and(|note| note.is_approved())
        {
            debug!(shift_id = %shift.id, "Absence note already approved, skipping lateness check");
            return Ok(LatenessOutcome::Skipped);
        }

        let delay_minutes = delay_minutes(shift.scheduled_start, clock_in);
        match classify_delay(delay_minutes, &self.policy) {
            DelayClass::OnTime => {
                debug!(shift_id = %shift.id, delay_minutes, "Clock-in on time");
                Ok(LatenessOutcome::OnTime { delay_minutes })
            }
            DelayClass::SignificantDelay => {
                info!(
                    shift_id = %shift.id,
                    employee_id = %shift.employee_id,
                    delay_minutes,
                    "Significant clock-in delay"
                );
                self.events.publish(ShiftEvent::SignificantDelay {
                    shift: shift.clone(),
                    delay_minutes,
                });
                Ok(LatenessOutcome::SignificantDelay { delay_minutes })
            }
            DelayClass::MajorAbsence => {
                let reason = format!(
                    "Clocked in {} minutes after the scheduled start of {}",
                    delay_minutes,
                    shift.scheduled_start.format("%Y-%m-%d %H:%M")
                );
                let (absence_note, note_created) = self.store.create_absence_note_if_absent(
                    &shift.id,
                    reason,
                    self.clock.now(),
                )?;
                info!(
                    shift_id = %shift.id,
                    employee_id = %shift.employee_id,
                    delay_minutes,
                    absence_note_id = %absence_note.id,
                    note_created,
                    "Major absence detected"
                );
                self.events.publish(ShiftEvent::MajorAbsenceDetected {
                    shift: shift.clone(),
                    delay_minutes,
                    absence_note: absence_note.clone(),
                });
                Ok(LatenessOutcome::MajorAbsence {
                    delay_minutes,
                    absence_note,
                    note_created,
                })
            }
        }
    }
}
