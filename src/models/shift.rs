//! Shift model and related types.
//!
//! This module defines the [`Shift`] aggregate, its lifecycle [`ShiftState`],
//! and the supplemental [`Break`] records that hang off a shift.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::PunchMetadata;

/// The lifecycle state of a shift.
///
/// `Pending → Active → Paused ⇄ Active → Finished`. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftState {
    /// Scheduled but not yet clocked in.
    Pending,
    /// Clocked in and working.
    Active,
    /// Clocked in and on a break.
    Paused,
    /// Clocked out.
    Finished,
}

impl ShiftState {
    /// Returns true while the shift has been clocked in but not clocked out.
    pub fn is_running(self) -> bool {
        matches!(self, ShiftState::Active | ShiftState::Paused)
    }
}

impl fmt::Display for ShiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShiftState::Pending => "pending",
            ShiftState::Active => "active",
            ShiftState::Paused => "paused",
            ShiftState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// A manual HR decision that overrides the computed shift outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusOverride {
    /// The absence or lateness has been justified.
    Justified,
    /// The shift is recorded as absenteeism.
    Absenteeism,
}

/// A supplemental break taken during a shift.
///
/// The mandatory break lives on the [`Shift`] itself; every other break is
/// recorded as one of these child rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {
    /// Unique identifier for the break.
    pub id: String,
    /// The shift this break belongs to.
    pub shift_id: String,
    /// When the break started.
    pub start: NaiveDateTime,
    /// When the break ended, if it has.
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    /// Metadata captured when the break started.
    pub start_punch: PunchMetadata,
    /// Metadata captured when the break ended.
    #[serde(default)]
    pub end_punch: Option<PunchMetadata>,
}

impl Break {
    /// Returns true if the break has not been closed yet.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Represents one scheduled work interval with actual clock events layered on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The contract this shift is worked under.
    pub contract_id: String,
    /// The employee holding the contract.
    pub employee_id: String,
    /// When the shift is scheduled to start.
    pub scheduled_start: NaiveDateTime,
    /// When the shift is scheduled to end.
    pub scheduled_end: NaiveDateTime,
    /// The current lifecycle state.
    pub state: ShiftState,
    /// Actual clock-in time.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Actual clock-out time.
    #[serde(default)]
    pub clock_out: Option<NaiveDateTime>,
    /// Start of the mandatory break.
    #[serde(default)]
    pub break_start: Option<NaiveDateTime>,
    /// End of the mandatory break.
    #[serde(default)]
    pub break_end: Option<NaiveDateTime>,
    /// Metadata captured at clock-in.
    #[serde(default)]
    pub clock_in_punch: Option<PunchMetadata>,
    /// Metadata captured at clock-out.
    #[serde(default)]
    pub clock_out_punch: Option<PunchMetadata>,
    /// Metadata captured when the mandatory break started.
    #[serde(default)]
    pub break_start_punch: Option<PunchMetadata>,
    /// Metadata captured when the mandatory break ended.
    #[serde(default)]
    pub break_end_punch: Option<PunchMetadata>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Manual status override set by HR.
    #[serde(default)]
    pub status_override: Option<StatusOverride>,
}

impl Shift {
    /// Creates a new pending shift with no clock events.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_timeclock::models::{Shift, ShiftState};
    /// use chrono::NaiveDateTime;
    ///
    /// let shift = Shift::scheduled(
    ///     "shift_001",
    ///     "contract_001",
    ///     "emp_001",
    ///     NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     NaiveDateTime::parse_from_str("2026-01-15 13:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// );
    /// assert_eq!(shift.state, ShiftState::Pending);
    /// assert_eq!(shift.scheduled_duration().num_hours(), 4);
    /// ```
    pub fn scheduled(
        id: impl Into<String>,
        contract_id: impl Into<String>,
        employee_id: impl Into<String>,
        scheduled_start: NaiveDateTime,
        scheduled_end: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            contract_id: contract_id.into(),
            employee_id: employee_id.into(),
            scheduled_start,
            scheduled_end,
            state: ShiftState::Pending,
            clock_in: None,
            clock_out: None,
            break_start: None,
            break_end: None,
            clock_in_punch: None,
            clock_out_punch: None,
            break_start_punch: None,
            break_end_punch: None,
            notes: None,
            status_override: None,
        }
    }

    /// The calendar day the shift belongs to, taken from its scheduled start.
    pub fn date(&self) -> NaiveDate {
        self.scheduled_start.date()
    }

    /// Length of the scheduled interval.
    pub fn scheduled_duration(&self) -> Duration {
        self.scheduled_end - self.scheduled_start
    }

    /// Returns true once the mandatory break has been started at least once.
    pub fn mandatory_break_taken(&self) -> bool {
        self.break_start.is_some()
    }

    /// Returns true while the mandatory break is in progress.
    pub fn has_open_mandatory_break(&self) -> bool {
        self.break_start.is_some() && self.break_end.is_none()
    }

    /// Returns true if `next` starts exactly when this shift is scheduled to end.
    pub fn is_contiguous_with(&self, next: &Shift) -> bool {
        self.scheduled_end == next.scheduled_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn morning_shift() -> Shift {
        Shift::scheduled(
            "shift_001",
            "contract_001",
            "emp_001",
            make_datetime("2026-01-15", "09:00:00"),
            make_datetime("2026-01-15", "13:00:00"),
        )
    }

    #[test]
    fn test_scheduled_shift_starts_pending() {
        let shift = morning_shift();
        assert_eq!(shift.state, ShiftState::Pending);
        assert!(shift.clock_in.is_none());
        assert!(!shift.mandatory_break_taken());
    }

    #[test]
    fn test_date_comes_from_scheduled_start() {
        let shift = Shift::scheduled(
            "night",
            "contract_001",
            "emp_001",
            make_datetime("2026-01-15", "22:00:00"),
            make_datetime("2026-01-16", "06:00:00"),
        );
        assert_eq!(shift.date(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(shift.scheduled_duration(), Duration::hours(8));
    }

    #[test]
    fn test_contiguous_shifts() {
        let morning = morning_shift();
        let afternoon = Shift::scheduled(
            "shift_002",
            "contract_001",
            "emp_001",
            make_datetime("2026-01-15", "13:00:00"),
            make_datetime("2026-01-15", "17:00:00"),
        );
        let late = Shift::scheduled(
            "shift_003",
            "contract_001",
            "emp_001",
            make_datetime("2026-01-15", "13:01:00"),
            make_datetime("2026-01-15", "17:00:00"),
        );

        assert!(morning.is_contiguous_with(&afternoon));
        assert!(!morning.is_contiguous_with(&late));
        assert!(!afternoon.is_contiguous_with(&morning));
    }

    #[test]
    fn test_open_mandatory_break() {
        let mut shift = morning_shift();
        shift.break_start = Some(make_datetime("2026-01-15", "11:00:00"));
        assert!(shift.has_open_mandatory_break());

        shift.break_end = Some(make_datetime("2026-01-15", "11:30:00"));
        assert!(!shift.has_open_mandatory_break());
        assert!(shift.mandatory_break_taken());
    }

    #[test]
    fn test_running_states() {
        assert!(!ShiftState::Pending.is_running());
        assert!(ShiftState::Active.is_running());
        assert!(ShiftState::Paused.is_running());
        assert!(!ShiftState::Finished.is_running());
    }

    #[test]
    fn test_shift_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ShiftState::Finished).unwrap(),
            "\"finished\""
        );
        assert_eq!(ShiftState::Paused.to_string(), "paused");
    }

    #[test]
    fn test_shift_deserialization_defaults_optional_fields() {
        let json = r#"{
            "id": "shift_001",
            "contract_id": "contract_001",
            "employee_id": "emp_001",
            "scheduled_start": "2026-01-15T09:00:00",
            "scheduled_end": "2026-01-15T13:00:00",
            "state": "pending"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift, morning_shift());
    }
}
