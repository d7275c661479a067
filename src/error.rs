//! Error types for the Shift Timeclock Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every way a shift action can be rejected. None of these errors are
//! fatal: the API layer maps each one to a specific user-facing message.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ShiftState;

/// The main error type for the Shift Timeclock Engine.
///
/// # Example
///
/// ```
/// use shift_timeclock::error::TimeclockError;
///
/// let error = TimeclockError::ShiftNotFound {
///     shift_id: "shift_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Shift not found: shift_001");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeclockError {
    /// The requested action is illegal for the shift's current lifecycle state.
    #[error("Cannot {action} shift '{shift_id}' while it is {state}")]
    StateConflict {
        /// The shift the action was attempted on.
        shift_id: String,
        /// The state the shift was in.
        state: ShiftState,
        /// A short verb phrase naming the rejected action.
        action: String,
    },

    /// Another shift of the same employee is already running that day.
    #[error(
        "Another shift is already active for employee '{employee_id}' on {date} (active shift '{active_shift_id}')"
    )]
    DuplicateActiveShift {
        /// The employee owning both shifts.
        employee_id: String,
        /// The calendar day the exclusivity applies to.
        date: NaiveDate,
        /// The shift that is already active or paused.
        active_shift_id: String,
    },

    /// The shift has already been clocked out.
    #[error("Shift '{shift_id}' is already finished")]
    AlreadyFinished {
        /// The finished shift.
        shift_id: String,
    },

    /// A break cannot be started right now.
    #[error("Break not allowed for shift '{shift_id}': {reason}")]
    BreakNotAllowed {
        /// The shift the break was requested on.
        shift_id: String,
        /// Why the break was refused.
        reason: String,
    },

    /// There is no open break to resume from.
    #[error("Shift '{shift_id}' has no open break")]
    NoOpenBreak {
        /// The shift that was asked to resume.
        shift_id: String,
    },

    /// Two shifts do not touch, so no automatic handoff can be arranged.
    #[error("Shift '{next_shift_id}' does not start when shift '{current_shift_id}' ends")]
    NotContiguous {
        /// The shift that would be ended automatically.
        current_shift_id: String,
        /// The shift that would be started automatically.
        next_shift_id: String,
    },

    /// No shift exists with the given ID.
    #[error("Shift not found: {shift_id}")]
    ShiftNotFound {
        /// The unknown shift ID.
        shift_id: String,
    },

    /// No employee exists with the given ID.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The unknown employee ID.
        employee_id: String,
    },

    /// A shift could not be scheduled because its data is inconsistent.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return TimeclockError.
pub type TimeclockResult<T> = Result<T, TimeclockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_conflict_names_action_and_state() {
        let error = TimeclockError::StateConflict {
            shift_id: "shift_001".to_string(),
            state: ShiftState::Finished,
            action: "start".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot start shift 'shift_001' while it is finished"
        );
    }

    #[test]
    fn test_duplicate_active_shift_gives_specific_reason() {
        let error = TimeclockError::DuplicateActiveShift {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            active_shift_id: "shift_001".to_string(),
        };
        assert!(error.to_string().starts_with("Another shift is already active"));
        assert!(error.to_string().contains("2026-01-15"));
    }

    #[test]
    fn test_no_open_break_displays_shift() {
        let error = TimeclockError::NoOpenBreak {
            shift_id: "shift_001".to_string(),
        };
        assert_eq!(error.to_string(), "Shift 'shift_001' has no open break");
    }

    #[test]
    fn test_not_contiguous_displays_both_shifts() {
        let error = TimeclockError::NotContiguous {
            current_shift_id: "a".to_string(),
            next_shift_id: "b".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Shift 'b' does not start when shift 'a' ends"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = TimeclockError::ConfigParseError {
            path: "/config/policy.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/policy.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<TimeclockError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> TimeclockResult<()> {
            Err(TimeclockError::ShiftNotFound {
                shift_id: "missing".to_string(),
            })
        }

        fn propagates_error() -> TimeclockResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
