//! Worked and remaining time for a shift.
//!
//! These are pure functions of a shift, its supplemental breaks, and "now".
//! An unfinished shift and an unfinished break both run up to the shift's
//! end boundary: the clock-out if there is one, otherwise `now`.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Break, Shift};

/// Computed time figures for one shift at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftStatistics {
    /// Whole minutes worked so far.
    pub worked_minutes: i64,
    /// Hours worked so far (minutes / 60).
    pub worked_hours: Decimal,
    /// Whole minutes left of the scheduled duration, `None` before clock-in.
    pub remaining_minutes: Option<i64>,
}

/// Time worked on a shift: end boundary minus clock-in minus break time.
///
/// Returns zero for a shift that has not been clocked in. Break intervals are
/// clipped to the worked interval and overlapping breaks are only counted
/// once, so the result is never negative and never decreases as `now`
/// advances.
///
/// # Examples
///
/// ```
/// use shift_timeclock::calculation::total_worked_time;
/// use shift_timeclock::models::Shift;
/// use chrono::{Duration, NaiveDateTime};
///
/// let at = |t: &str| NaiveDateTime::parse_from_str(&format!("2026-01-15 {t}"), "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let mut shift = Shift::scheduled("shift_001", "contract_001", "emp_001", at("09:00:00"), at("17:00:00"));
/// shift.clock_in = Some(at("09:00:00"));
/// shift.break_start = Some(at("12:00:00"));
/// shift.break_end = Some(at("12:30:00"));
///
/// assert_eq!(total_worked_time(&shift, &[], at("14:00:00")), Duration::minutes(270));
/// ```
pub fn total_worked_time(shift: &Shift, breaks: &[Break], now: NaiveDateTime) -> Duration {
    let Some(clock_in) = shift.clock_in else {
        return Duration::zero();
    };
    let boundary = shift.clock_out.unwrap_or(now).max(clock_in);

    let mut spans: Vec<(NaiveDateTime, NaiveDateTime)> = breaks
        .iter()
        .filter(|b| b.shift_id == shift.id)
        .map(|b| (Some(b.start), b.end))
        .chain(std::iter::once((shift.break_start, shift.break_end)))
        .filter_map(|(start, end)| clip_break(start?, end, clock_in, boundary))
        .collect();
    spans.sort();

    let mut on_break = Duration::zero();
    let mut covered_until = clock_in;
    for (start, end) in spans {
        let start = start.max(covered_until);
        if end > start {
            on_break += end - start;
            covered_until = end;
        }
    }

    (boundary - clock_in - on_break).max(Duration::zero())
}

/// Scheduled duration minus worked time, floored at zero.
///
/// Returns `None` if the shift has not been clocked in yet.
pub fn remaining_time(shift: &Shift, breaks: &[Break], now: NaiveDateTime) -> Option<Duration> {
    shift.clock_in?;
    let remaining = shift.scheduled_duration() - total_worked_time(shift, breaks, now);
    Some(remaining.max(Duration::zero()))
}

/// Converts a duration into decimal hours of whole minutes, rounded to
/// two places.
///
/// ```
/// use shift_timeclock::calculation::worked_hours;
/// use chrono::Duration;
/// use rust_decimal::Decimal;
///
/// assert_eq!(worked_hours(Duration::minutes(90)), Decimal::new(15, 1));
/// ```
pub fn worked_hours(duration: Duration) -> Decimal {
    (Decimal::new(duration.num_minutes(), 0) / Decimal::new(60, 0)).round_dp(2)
}

/// Computes every time figure reported for a shift.
pub fn compute_statistics(shift: &Shift, breaks: &[Break], now: NaiveDateTime) -> ShiftStatistics {
    let worked = total_worked_time(shift, breaks, now);
    ShiftStatistics {
        worked_minutes: worked.num_minutes(),
        worked_hours: worked_hours(worked),
        remaining_minutes: remaining_time(shift, breaks, now).map(|d| d.num_minutes()),
    }
}

fn clip_break(
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    clock_in: NaiveDateTime,
    boundary: NaiveDateTime,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = start.clamp(clock_in, boundary);
    let end = end.unwrap_or(boundary).clamp(start, boundary);
    (end > start).then_some((start, end))
}
