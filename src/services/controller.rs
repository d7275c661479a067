//! Boundary operations exposed to the UI layer.
//!
//! The [`ShiftController`] wires the services together and offers the two
//! operations the UI needs: today's status for an employee, and a single
//! entry point for every shift action.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::{ShiftStatistics, compute_statistics};
use crate::config::ShiftPolicy;
use crate::error::{TimeclockError, TimeclockResult};
use crate::jobs::JobQueue;
use crate::models::{
    AbsenceNote, AbsenceNoteStatus, PunchMetadata, Shift, ShiftState, StatusOverride,
};
use crate::ports::{Clock, EmployeeDirectory, EventSink};
use crate::store::ShiftStore;

use super::{
    BreakManager, ClockService, LatenessDetector, TransitionHandler, TransitionScheduler,
};

/// An action the employee can take on a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftAction {
    /// Clock in.
    Start,
    /// Start the mandatory break.
    PauseMandatory,
    /// Start a supplemental break.
    PauseSupplemental,
    /// End the open break.
    Resume,
    /// Clock out.
    Finish,
}

/// A shift plus its computed figures, as shown to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Shift ID.
    pub id: String,
    /// Contract the shift is worked under.
    pub contract_id: String,
    /// Scheduled start.
    pub scheduled_start: NaiveDateTime,
    /// Scheduled end.
    pub scheduled_end: NaiveDateTime,
    /// Actual clock-in.
    pub clock_in: Option<NaiveDateTime>,
    /// Actual clock-out.
    pub clock_out: Option<NaiveDateTime>,
    /// Lifecycle state.
    pub state: ShiftState,
    /// Manual HR override.
    pub status_override: Option<StatusOverride>,
    /// Worked and remaining time.
    #[serde(flatten)]
    pub statistics: ShiftStatistics,
    /// Whether a break is in progress.
    pub has_open_break: bool,
    /// Whether the mandatory break may start now.
    pub can_start_mandatory_break: bool,
    /// Whether a supplemental break may start now.
    pub can_start_supplemental_break: bool,
}

/// Today's shifts for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeStatus {
    /// The employee.
    pub employee_id: String,
    /// The calendar day reported.
    pub date: NaiveDate,
    /// Shifts ordered by scheduled start. Empty when nothing is scheduled.
    pub shifts: Vec<ShiftSummary>,
}

/// Entry point for the UI layer.
#[derive(Clone)]
pub struct ShiftController {
    store: Arc<dyn ShiftStore>,
    directory: Arc<dyn EmployeeDirectory>,
    clock: Arc<dyn Clock>,
    clock_service: ClockService,
    breaks: BreakManager,
}

impl ShiftController {
    /// Wires every service on top of the given collaborators.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        directory: Arc<dyn EmployeeDirectory>,
        clock: Arc<dyn Clock>,
        events: Arc<dyn EventSink>,
        queue: Arc<dyn JobQueue>,
        policy: ShiftPolicy,
    ) -> Self {
        let lateness = LatenessDetector::new(
            store.clone(),
            clock.clone(),
            events,
            policy.lateness,
        );
        let transitions = TransitionScheduler::new(clock.clone(), queue);
        let clock_service =
            ClockService::new(store.clone(), clock.clone(), lateness, transitions);
        let breaks = BreakManager::new(store.clone(), clock.clone(), policy.breaks);

        Self {
            store,
            directory,
            clock,
            clock_service,
            breaks,
        }
    }

    /// The clock service used by this controller.
    pub fn clock_service(&self) -> &ClockService {
        &self.clock_service
    }

    /// The break manager used by this controller.
    pub fn break_manager(&self) -> &BreakManager {
        &self.breaks
    }

    /// A handler that runs transition jobs through this controller's services.
    pub fn transition_handler(&self) -> TransitionHandler {
        TransitionHandler::new(
            self.store.clone(),
            self.clock.clone(),
            self.clock_service.clone(),
        )
    }

    /// Today's shifts for an employee, ordered by scheduled start.
    ///
    /// Fails with `EmployeeNotFound` for unknown employees; an employee with
    /// nothing scheduled gets an empty list.
    pub fn current_status(&self, employee_id: &str) -> TimeclockResult<EmployeeStatus> {
        if self.directory.find_employee(employee_id).is_none() {
            return Err(TimeclockError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }

        let date = self.clock.now().date();
        let shifts = self
            .store
            .shifts_for_employee_on(employee_id, date)
            .iter()
            .map(|shift| self.summarize(shift))
            .collect();

        Ok(EmployeeStatus {
            employee_id: employee_id.to_string(),
            date,
            shifts,
        })
    }

    /// Performs one action on a shift and returns its updated summary.
    pub fn perform_action(
        &self,
        shift_id: &str,
        action: ShiftAction,
        punch: PunchMetadata,
    ) -> TimeclockResult<ShiftSummary> {
        info!(shift_id = %shift_id, action = ?action, "Performing shift action");
        let shift = match action {
            ShiftAction::Start => self.clock_service.start(shift_id, punch)?,
            ShiftAction::PauseMandatory => self.breaks.start_break(shift_id, punch, true)?,
            ShiftAction::PauseSupplemental => self.breaks.start_break(shift_id, punch, false)?,
            ShiftAction::Resume => self.breaks.finish_break(shift_id, punch)?,
            ShiftAction::Finish => self.clock_service.finish(shift_id, punch)?,
        };
        Ok(self.summarize(&shift))
    }

    /// Schedules a new pending shift under a contract.
    ///
    /// The owning employee is resolved through the directory; an unknown
    /// contract is rejected as `InvalidShift`.
    pub fn schedule_shift(
        &self,
        shift_id: &str,
        contract_id: &str,
        scheduled_start: NaiveDateTime,
        scheduled_end: NaiveDateTime,
    ) -> TimeclockResult<Shift> {
        let employee_id = self
            .directory
            .employee_for_contract(contract_id)
            .ok_or_else(|| TimeclockError::InvalidShift {
                shift_id: shift_id.to_string(),
                message: format!("no employee holds contract '{}'", contract_id),
            })?;

        let shift = self.store.insert_shift(Shift::scheduled(
            shift_id,
            contract_id,
            employee_id,
            scheduled_start,
            scheduled_end,
        ))?;
        info!(
            shift_id = %shift.id,
            employee_id = %shift.employee_id,
            scheduled_start = %shift.scheduled_start,
            scheduled_end = %shift.scheduled_end,
            "Shift scheduled"
        );
        Ok(shift)
    }

    /// Records an HR decision on a shift's absence note.
    pub fn review_absence_note(
        &self,
        shift_id: &str,
        status: AbsenceNoteStatus,
    ) -> TimeclockResult<AbsenceNote> {
        let note = self.store.set_absence_note_status(shift_id, status)?;
        info!(shift_id = %shift_id, status = ?note.status, "Absence note reviewed");
        Ok(note)
    }

    /// Sets or clears the manual status override of a shift.
    pub fn override_status(
        &self,
        shift_id: &str,
        status_override: Option<StatusOverride>,
    ) -> TimeclockResult<ShiftSummary> {
        let shift = self.store.set_status_override(shift_id, status_override)?;
        info!(shift_id = %shift_id, status_override = ?status_override, "Status override set");
        Ok(self.summarize(&shift))
    }

    /// Loads a shift, failing with `ShiftNotFound`.
    pub fn shift(&self, shift_id: &str) -> TimeclockResult<Shift> {
        self.store.get_shift(shift_id)
    }

    /// Builds the UI summary of a shift at the current instant.
    pub fn summarize(&self, shift: &Shift) -> ShiftSummary {
        let breaks = self.store.breaks_for_shift(&shift.id);
        let statistics = compute_statistics(shift, &breaks, self.clock.now());
        let has_open_break =
            shift.has_open_mandatory_break() || breaks.iter().any(|b| b.is_open());

        ShiftSummary {
            id: shift.id.clone(),
            contract_id: shift.contract_id.clone(),
            scheduled_start: shift.scheduled_start,
            scheduled_end: shift.scheduled_end,
            clock_in: shift.clock_in,
            clock_out: shift.clock_out,
            state: shift.state,
            status_override: shift.status_override,
            statistics,
            has_open_break,
            can_start_mandatory_break: self.breaks.can_start_mandatory(shift),
            can_start_supplemental_break: self.breaks.can_start_supplemental(shift),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{Harness, at, user_punch};

    #[test]
    fn test_status_for_unknown_employee_is_not_found() {
        let harness = Harness::new("09:00:00");
        let err = harness.controller.current_status("emp_404").unwrap_err();
        assert_eq!(
            err,
            TimeclockError::EmployeeNotFound {
                employee_id: "emp_404".to_string()
            }
        );
    }

    #[test]
    fn test_status_with_nothing_scheduled_is_empty() {
        let harness = Harness::new("09:00:00");
        let status = harness.controller.current_status("emp_001").unwrap();
        assert!(status.shifts.is_empty());
    }

    #[test]
    fn test_status_lists_todays_shifts_in_order() {
        let harness = Harness::new("10:00:00");
        harness.schedule("late", "13:00:00", "17:00:00");
        harness.schedule("early", "09:00:00", "13:00:00");
        harness
            .controller
            .perform_action("early", ShiftAction::Start, user_punch())
            .unwrap();

        let status = harness.controller.current_status("emp_001").unwrap();
        let ids: Vec<&str> = status.shifts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);

        let early = &status.shifts[0];
        assert_eq!(early.state, ShiftState::Active);
        assert_eq!(early.statistics.worked_minutes, 0);
        assert_eq!(early.statistics.remaining_minutes, Some(240));
        assert_eq!(status.shifts[1].statistics.remaining_minutes, None);
    }

    #[test]
    fn test_perform_action_walks_full_lifecycle() {
        let harness = Harness::new("09:00:00");
        harness.schedule("a", "09:00:00", "17:00:00");
        let controller = &harness.controller;

        let summary = controller
            .perform_action("a", ShiftAction::Start, user_punch())
            .unwrap();
        assert_eq!(summary.state, ShiftState::Active);
        assert!(!summary.can_start_mandatory_break);
        assert!(summary.can_start_supplemental_break);

        harness.now("13:00:00");
        let summary = controller
            .perform_action("a", ShiftAction::PauseMandatory, user_punch())
            .unwrap();
        assert_eq!(summary.state, ShiftState::Paused);
        assert!(summary.has_open_break);

        harness.now("13:30:00");
        let summary = controller
            .perform_action("a", ShiftAction::Resume, user_punch())
            .unwrap();
        assert_eq!(summary.state, ShiftState::Active);
        assert!(!summary.has_open_break);
        assert!(!summary.can_start_mandatory_break);

        harness.now("15:00:00");
        controller
            .perform_action("a", ShiftAction::PauseSupplemental, user_punch())
            .unwrap();
        harness.now("15:15:00");
        controller
            .perform_action("a", ShiftAction::Resume, user_punch())
            .unwrap();

        harness.now("17:00:00");
        let summary = controller
            .perform_action("a", ShiftAction::Finish, user_punch())
            .unwrap();
        assert_eq!(summary.state, ShiftState::Finished);
        // 8h - 30m mandatory - 15m supplemental
        assert_eq!(summary.statistics.worked_minutes, 435);
        assert_eq!(summary.statistics.remaining_minutes, Some(45));
    }

    #[test]
    fn test_schedule_shift_resolves_employee_from_contract() {
        let harness = Harness::new("08:00:00");
        let shift = harness
            .controller
            .schedule_shift("a", "contract_001", at("09:00:00"), at("13:00:00"))
            .unwrap();

        assert_eq!(shift.employee_id, "emp_001");
        assert_eq!(shift.state, ShiftState::Pending);
        assert_eq!(harness.store.get_shift("a").unwrap(), shift);
    }

    #[test]
    fn test_schedule_shift_with_unknown_contract_is_invalid() {
        let harness = Harness::new("08:00:00");
        let err = harness
            .controller
            .schedule_shift("a", "contract_404", at("09:00:00"), at("13:00:00"))
            .unwrap_err();
        assert!(matches!(err, TimeclockError::InvalidShift { .. }));
    }

    #[test]
    fn test_review_absence_note_approves_it() {
        let harness = Harness::new("10:30:00");
        harness.schedule("a", "09:00:00", "17:00:00");
        harness
            .controller
            .perform_action("a", ShiftAction::Start, user_punch())
            .unwrap();

        let note = harness
            .controller
            .review_absence_note("a", AbsenceNoteStatus::Approved)
            .unwrap();
        assert!(note.is_approved());
    }

    #[test]
    fn test_override_status_is_reported_in_summary() {
        let harness = Harness::new("09:00:00");
        harness.schedule("a", "09:00:00", "17:00:00");

        let summary = harness
            .controller
            .override_status("a", Some(StatusOverride::Justified))
            .unwrap();
        assert_eq!(summary.status_override, Some(StatusOverride::Justified));

        let cleared = harness.controller.override_status("a", None).unwrap();
        assert_eq!(cleared.status_override, None);
    }

    #[test]
    fn test_action_serializes_snake_case() {
        let action: ShiftAction = serde_json::from_str("\"pause_supplemental\"").unwrap();
        assert_eq!(action, ShiftAction::PauseSupplemental);
    }
}
