//! Core data models for the Shift Timeclock Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence_note;
mod employee;
mod event;
mod punch;
mod shift;

pub use absence_note::{AbsenceNote, AbsenceNoteStatus};
pub use employee::Employee;
pub use event::ShiftEvent;
pub use punch::{Actor, GeoLocation, NetworkInfo, PunchMetadata};
pub use shift::{Break, Shift, ShiftState, StatusOverride};
