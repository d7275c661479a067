//! Clock-in delay classification.
//!
//! The delay is the whole number of minutes between the scheduled start and
//! the actual clock-in, never negative. It is classified against the
//! [`LatenessPolicy`] thresholds; both thresholds are exclusive, so a delay
//! of exactly 15 minutes is still on time and exactly 60 is still only a
//! significant delay.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::LatenessPolicy;

/// How late a clock-in was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayClass {
    /// At or below the significant-delay threshold.
    OnTime,
    /// Above the significant-delay threshold, at or below the major one.
    SignificantDelay,
    /// Above the major-absence threshold.
    MajorAbsence,
}

/// Minutes between scheduled start and clock-in, clamped to zero.
///
/// # Examples
///
/// ```
/// use shift_timeclock::calculation::delay_minutes;
/// use chrono::NaiveDateTime;
///
/// let at = |t: &str| NaiveDateTime::parse_from_str(&format!("2026-01-15 {t}"), "%Y-%m-%d %H:%M:%S").unwrap();
///
/// assert_eq!(delay_minutes(at("09:00:00"), at("09:45:00")), 45);
/// assert_eq!(delay_minutes(at("09:00:00"), at("08:50:00")), 0);
/// ```
pub fn delay_minutes(scheduled_start: NaiveDateTime, clock_in: NaiveDateTime) -> i64 {
    (clock_in - scheduled_start).num_minutes().max(0)
}

/// Classifies a delay against the policy thresholds.
pub fn classify_delay(delay_minutes: i64, policy: &LatenessPolicy) -> DelayClass {
    if delay_minutes > policy.major_absence_minutes {
        DelayClass::MajorAbsence
    } else if delay_minutes > policy.significant_delay_minutes {
        DelayClass::SignificantDelay
    } else {
        DelayClass::OnTime
    }
}
