//! Absence note model.
//!
//! An absence note is the justification record attached to a shift when the
//! employee clocked in far too late. There is at most one per shift.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Review status of an absence note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceNoteStatus {
    /// Awaiting HR review.
    Pending,
    /// Accepted by HR. Lateness checks no longer apply to the shift.
    Approved,
    /// Refused by HR.
    Rejected,
}

/// A justification record for a late or missed shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceNote {
    /// Unique identifier for the note.
    pub id: String,
    /// The shift the note justifies.
    pub shift_id: String,
    /// Review status.
    pub status: AbsenceNoteStatus,
    /// Why the note exists.
    pub reason: String,
    /// When the note was created.
    pub created_at: NaiveDateTime,
}

impl AbsenceNote {
    /// Returns true once HR has approved the note.
    pub fn is_approved(&self) -> bool {
        self.status == AbsenceNoteStatus::Approved
    }
}
