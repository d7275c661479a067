//! Persistence of shifts, breaks and absence notes.
//!
//! The [`ShiftStore`] is the only component that writes shift records. Every
//! mutation that carries an invariant (shift exclusivity, lifecycle guards,
//! one absence note per shift) is a single atomic operation on the store, so
//! two near-simultaneous requests cannot both succeed.

mod memory;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::TimeclockResult;
use crate::models::{
    AbsenceNote, AbsenceNoteStatus, Break, PunchMetadata, Shift, StatusOverride,
};

pub use memory::InMemoryShiftStore;

/// Storage for shift records.
pub trait ShiftStore: Send + Sync {
    /// Persists a newly scheduled shift.
    ///
    /// Fails with `InvalidShift` if the ID is taken, the shift is not pending,
    /// or its scheduled end is not after its scheduled start.
    fn insert_shift(&self, shift: Shift) -> TimeclockResult<Shift>;

    /// Loads a shift by ID, failing with `ShiftNotFound`.
    fn get_shift(&self, shift_id: &str) -> TimeclockResult<Shift>;

    /// All shifts of an employee on a calendar day, ordered by scheduled start.
    fn shifts_for_employee_on(&self, employee_id: &str, date: NaiveDate) -> Vec<Shift>;

    /// The same employee's pending shift that starts exactly when `shift` is
    /// scheduled to end. Ties go to the lowest ID.
    fn find_successor(&self, shift: &Shift) -> Option<Shift>;

    /// Supplemental breaks of a shift, oldest first.
    fn breaks_for_shift(&self, shift_id: &str) -> Vec<Break>;

    /// Number of supplemental breaks an employee has started on a calendar day.
    fn supplemental_breaks_on(&self, employee_id: &str, date: NaiveDate) -> usize;

    /// Clocks a pending shift in.
    ///
    /// The exclusivity check and the write happen atomically: fails with
    /// `DuplicateActiveShift` if another shift of the same employee on the
    /// same day is active or paused, and with `StateConflict` if the shift is
    /// not pending.
    fn clock_in(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift>;

    /// Clocks a running shift out, closing any open break at the same instant.
    ///
    /// Fails with `AlreadyFinished` for finished shifts and `StateConflict`
    /// for shifts never started.
    fn clock_out(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift>;

    /// Starts the shift's mandatory break and pauses it.
    fn open_mandatory_break(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift>;

    /// Creates a supplemental break and pauses the shift.
    fn open_supplemental_break(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<(Shift, Break)>;

    /// Closes the open mandatory break, or else the latest open supplemental
    /// break, and reactivates the shift. Fails with `NoOpenBreak`.
    fn close_open_break(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift>;

    /// The shift's absence note, if one exists.
    fn absence_note_for(&self, shift_id: &str) -> Option<AbsenceNote>;

    /// Creates a pending absence note unless the shift already has one.
    ///
    /// Returns the note and whether it was created by this call.
    fn create_absence_note_if_absent(
        &self,
        shift_id: &str,
        reason: String,
        at: NaiveDateTime,
    ) -> TimeclockResult<(AbsenceNote, bool)>;

    /// Records an HR review decision on the shift's absence note.
    fn set_absence_note_status(
        &self,
        shift_id: &str,
        status: AbsenceNoteStatus,
    ) -> TimeclockResult<AbsenceNote>;

    /// Sets or clears the shift's manual status override.
    fn set_status_override(
        &self,
        shift_id: &str,
        status_override: Option<StatusOverride>,
    ) -> TimeclockResult<Shift>;
}
