//! Pure calculations for the Shift Timeclock Engine.
//!
//! This module contains the read-only statistics engine (worked and remaining
//! time) and the clock-in delay classification used by the lateness detector.

mod lateness;
mod worked_time;

pub use lateness::{DelayClass, classify_delay, delay_minutes};
pub use worked_time::{
    ShiftStatistics, compute_statistics, remaining_time, total_worked_time, worked_hours,
};
