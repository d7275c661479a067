//! Domain events published for downstream notification.

use serde::{Deserialize, Serialize};

use super::{AbsenceNote, Shift};

/// Events emitted by the lateness detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShiftEvent {
    /// The employee clocked in more than the significant-delay threshold late.
    SignificantDelay {
        /// The shift as it was right after clock-in.
        shift: Shift,
        /// How late the clock-in was, in minutes.
        delay_minutes: i64,
    },
    /// The employee clocked in more than the major-absence threshold late.
    MajorAbsenceDetected {
        /// The shift as it was right after clock-in.
        shift: Shift,
        /// How late the clock-in was, in minutes.
        delay_minutes: i64,
        /// The absence note attached to the shift.
        absence_note: AbsenceNote,
    },
}

impl ShiftEvent {
    /// Stable event name for routing.
    pub fn name(&self) -> &'static str {
        match self {
            ShiftEvent::SignificantDelay { .. } => "SignificantDelay",
            ShiftEvent::MajorAbsenceDetected { .. } => "MajorAbsenceDetected",
        }
    }

    /// The shift the event is about.
    pub fn shift(&self) -> &Shift {
        match self {
            ShiftEvent::SignificantDelay { shift, .. }
            | ShiftEvent::MajorAbsenceDetected { shift, .. } => shift,
        }
    }
}
