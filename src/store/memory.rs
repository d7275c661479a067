//! In-memory shift store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{TimeclockError, TimeclockResult};
use crate::models::{
    AbsenceNote, AbsenceNoteStatus, Break, PunchMetadata, Shift, ShiftState, StatusOverride,
};

use super::ShiftStore;

#[derive(Debug, Default)]
struct Tables {
    shifts: HashMap<String, Shift>,
    breaks: Vec<Break>,
    notes: HashMap<String, AbsenceNote>,
}

impl Tables {
    fn shift_mut(&mut self, shift_id: &str) -> TimeclockResult<&mut Shift> {
        self.shifts
            .get_mut(shift_id)
            .ok_or_else(|| TimeclockError::ShiftNotFound {
                shift_id: shift_id.to_string(),
            })
    }

    fn running_shift_of(&self, employee_id: &str, date: NaiveDate, except: &str) -> Option<&Shift> {
        self.shifts.values().find(|s| {
            s.id != except
                && s.employee_id == employee_id
                && s.date() == date
                && s.state.is_running()
        })
    }
}

/// Shift store keeping every table behind one mutex.
///
/// Each trait method takes the lock once, so every check-then-write is atomic
/// with respect to other callers. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShiftStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn state_conflict(shift: &Shift, action: &str) -> TimeclockError {
    TimeclockError::StateConflict {
        shift_id: shift.id.clone(),
        state: shift.state,
        action: action.to_string(),
    }
}

impl ShiftStore for InMemoryShiftStore {
    fn insert_shift(&self, shift: Shift) -> TimeclockResult<Shift> {
        if shift.scheduled_end <= shift.scheduled_start {
            return Err(TimeclockError::InvalidShift {
                shift_id: shift.id,
                message: "scheduled end must be after scheduled start".to_string(),
            });
        }
        if shift.state != ShiftState::Pending {
            return Err(TimeclockError::InvalidShift {
                shift_id: shift.id,
                message: "new shifts must be pending".to_string(),
            });
        }

        let mut tables = self.lock();
        if tables.shifts.contains_key(&shift.id) {
            return Err(TimeclockError::InvalidShift {
                shift_id: shift.id,
                message: "a shift with this ID already exists".to_string(),
            });
        }
        tables.shifts.insert(shift.id.clone(), shift.clone());
        Ok(shift)
    }

    fn get_shift(&self, shift_id: &str) -> TimeclockResult<Shift> {
        self.lock()
            .shifts
            .get(shift_id)
            .cloned()
            .ok_or_else(|| TimeclockError::ShiftNotFound {
                shift_id: shift_id.to_string(),
            })
    }

    fn shifts_for_employee_on(&self, employee_id: &str, date: NaiveDate) -> Vec<Shift> {
        let mut shifts: Vec<Shift> = self
            .lock()
            .shifts
            .values()
            .filter(|s| s.employee_id == employee_id && s.date() == date)
            .cloned()
            .collect();
        shifts.sort_by(|a, b| {
            a.scheduled_start
                .cmp(&b.scheduled_start)
                .then_with(|| a.id.cmp(&b.id))
        });
        shifts
    }

    fn find_successor(&self, shift: &Shift) -> Option<Shift> {
        self.lock()
            .shifts
            .values()
            .filter(|s| {
                s.id != shift.id
                    && s.state == ShiftState::Pending
                    && s.employee_id == shift.employee_id
                    && shift.is_contiguous_with(s)
            })
            .min_by(|a, b| a.id.cmp(&b.id))
            .cloned()
    }

    fn breaks_for_shift(&self, shift_id: &str) -> Vec<Break> {
        self.lock()
            .breaks
            .iter()
            .filter(|b| b.shift_id == shift_id)
            .cloned()
            .collect()
    }

    fn supplemental_breaks_on(&self, employee_id: &str, date: NaiveDate) -> usize {
        let tables = self.lock();
        tables
            .breaks
            .iter()
            .filter(|b| {
                tables
                    .shifts
                    .get(&b.shift_id)
                    .is_some_and(|s| s.employee_id == employee_id && s.date() == date)
            })
            .count()
    }

    fn clock_in(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift> {
        let mut tables = self.lock();

        let (employee_id, date) = {
            let shift = tables.shift_mut(shift_id)?;
            if shift.state != ShiftState::Pending {
                return Err(state_conflict(shift, "start"));
            }
            (shift.employee_id.clone(), shift.date())
        };

        if let Some(active) = tables.running_shift_of(&employee_id, date, shift_id) {
            return Err(TimeclockError::DuplicateActiveShift {
                employee_id,
                date,
                active_shift_id: active.id.clone(),
            });
        }

        let shift = tables.shift_mut(shift_id)?;
        shift.clock_in = Some(at);
        shift.clock_in_punch = Some(punch);
        shift.state = ShiftState::Active;
        Ok(shift.clone())
    }

    fn clock_out(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift> {
        let mut tables = self.lock();

        let clock_in = {
            let shift = tables.shift_mut(shift_id)?;
            match (shift.state, shift.clock_in) {
                (ShiftState::Finished, _) => {
                    return Err(TimeclockError::AlreadyFinished {
                        shift_id: shift_id.to_string(),
                    });
                }
                (ShiftState::Active | ShiftState::Paused, Some(clock_in)) => clock_in,
                _ => return Err(state_conflict(shift, "finish")),
            }
        };
        let at = at.max(clock_in);

        for open in tables
            .breaks
            .iter_mut()
            .filter(|b| b.shift_id == shift_id && b.is_open())
        {
            open.end = Some(at.max(open.start));
            open.end_punch = Some(punch.clone());
        }

        let shift = tables.shift_mut(shift_id)?;
        if let Some(break_start) = shift.break_start.filter(|_| shift.break_end.is_none()) {
            shift.break_end = Some(at.max(break_start));
            shift.break_end_punch = Some(punch.clone());
        }
        shift.clock_out = Some(at);
        shift.clock_out_punch = Some(punch);
        shift.state = ShiftState::Finished;
        Ok(shift.clone())
    }

    fn open_mandatory_break(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift> {
        let mut tables = self.lock();
        let shift = tables.shift_mut(shift_id)?;
        if shift.state != ShiftState::Active {
            return Err(state_conflict(shift, "pause"));
        }
        if shift.mandatory_break_taken() {
            return Err(TimeclockError::BreakNotAllowed {
                shift_id: shift_id.to_string(),
                reason: "the mandatory break has already been taken".to_string(),
            });
        }
        shift.break_start = Some(at);
        shift.break_start_punch = Some(punch);
        shift.state = ShiftState::Paused;
        Ok(shift.clone())
    }

    fn open_supplemental_break(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<(Shift, Break)> {
        let mut tables = self.lock();
        let shift = tables.shift_mut(shift_id)?;
        if shift.state != ShiftState::Active {
            return Err(state_conflict(shift, "pause"));
        }
        shift.state = ShiftState::Paused;
        let shift = shift.clone();

        let record = Break {
            id: Uuid::new_v4().to_string(),
            shift_id: shift_id.to_string(),
            start: at,
            end: None,
            start_punch: punch,
            end_punch: None,
        };
        tables.breaks.push(record.clone());
        Ok((shift, record))
    }

    fn close_open_break(
        &self,
        shift_id: &str,
        at: NaiveDateTime,
        punch: PunchMetadata,
    ) -> TimeclockResult<Shift> {
        let mut tables = self.lock();

        let shift = tables.shift_mut(shift_id)?;
        if shift.state == ShiftState::Finished {
            return Err(TimeclockError::AlreadyFinished {
                shift_id: shift_id.to_string(),
            });
        }
        if let Some(break_start) = shift.break_start.filter(|_| shift.break_end.is_none()) {
            shift.break_end = Some(at.max(break_start));
            shift.break_end_punch = Some(punch);
            shift.state = ShiftState::Active;
            return Ok(shift.clone());
        }

        let latest_open = tables
            .breaks
            .iter_mut()
            .filter(|b| b.shift_id == shift_id && b.is_open())
            .max_by_key(|b| b.start)
            .ok_or_else(|| TimeclockError::NoOpenBreak {
                shift_id: shift_id.to_string(),
            })?;
        latest_open.end = Some(at.max(latest_open.start));
        latest_open.end_punch = Some(punch);

        let shift = tables.shift_mut(shift_id)?;
        shift.state = ShiftState::Active;
        Ok(shift.clone())
    }

    fn absence_note_for(&self, shift_id: &str) -> Option<AbsenceNote> {
        self.lock().notes.get(shift_id).cloned()
    }

    fn create_absence_note_if_absent(
        &self,
        shift_id: &str,
        reason: String,
        at: NaiveDateTime,
    ) -> TimeclockResult<(AbsenceNote, bool)> {
        let mut tables = self.lock();
        tables.shift_mut(shift_id)?;

        if let Some(existing) = tables.notes.get(shift_id) {
            return Ok((existing.clone(), false));
        }

        let note = AbsenceNote {
            id: Uuid::new_v4().to_string(),
            shift_id: shift_id.to_string(),
            status: AbsenceNoteStatus::Pending,
            reason,
            created_at: at,
        };
        tables.notes.insert(shift_id.to_string(), note.clone());
        Ok((note, true))
    }

    fn set_absence_note_status(
        &self,
        shift_id: &str,
        status: AbsenceNoteStatus,
    ) -> TimeclockResult<AbsenceNote> {
        let mut tables = self.lock();
        tables.shift_mut(shift_id)?;
        let note = tables
            .notes
            .get_mut(shift_id)
            .ok_or_else(|| TimeclockError::InvalidShift {
                shift_id: shift_id.to_string(),
                message: "shift has no absence note".to_string(),
            })?;
        note.status = status;
        Ok(note.clone())
    }

    fn set_status_override(
        &self,
        shift_id: &str,
        status_override: Option<StatusOverride>,
    ) -> TimeclockResult<Shift> {
        let mut tables = self.lock();
        let shift = tables.shift_mut(shift_id)?;
        shift.status_override = status_override;
        Ok(shift.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Actor;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn at(time_str: &str) -> NaiveDateTime {
        make_datetime("2026-01-15", time_str)
    }

    fn shift(id: &str, start: &str, end: &str) -> Shift {
        Shift::scheduled(id, "contract_001", "emp_001", at(start), at(end))
    }

    fn store_with(shifts: Vec<Shift>) -> InMemoryShiftStore {
        let store = InMemoryShiftStore::new();
        for s in shifts {
            store.insert_shift(s).unwrap();
        }
        store
    }

    #[test]
    fn test_insert_rejects_inverted_schedule() {
        let store = InMemoryShiftStore::new();
        let result = store.insert_shift(shift("bad", "13:00:00", "09:00:00"));
        assert!(matches!(result, Err(TimeclockError::InvalidShift { .. })));
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let store = store_with(vec![shift("a", "09:00:00", "13:00:00")]);
        let result = store.insert_shift(shift("a", "14:00:00", "18:00:00"));
        assert!(matches!(result, Err(TimeclockError::InvalidShift { .. })));
    }

    #[test]
    fn test_get_unknown_shift_is_not_found() {
        let store = InMemoryShiftStore::new();
        assert_eq!(
            store.get_shift("nope"),
            Err(TimeclockError::ShiftNotFound {
                shift_id: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_shifts_for_employee_on_are_ordered() {
        let store = store_with(vec![
            shift("late", "13:00:00", "17:00:00"),
            shift("early", "09:00:00", "13:00:00"),
        ]);
        let ids: Vec<String> = store
            .shifts_for_employee_on("emp_001", at("00:00:00").date())
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert!(
            store
                .shifts_for_employee_on("emp_002", at("00:00:00").date())
                .is_empty()
        );
    }

    #[test]
    fn test_clock_in_is_exclusive_per_employee_and_day() {
        let store = store_with(vec![
            shift("a", "09:00:00", "13:00:00"),
            shift("b", "14:00:00", "18:00:00"),
        ]);
        store
            .clock_in("a", at("09:00:00"), PunchMetadata::system())
            .unwrap();

        let err = store
            .clock_in("b", at("09:05:00"), PunchMetadata::system())
            .unwrap_err();
        assert_eq!(
            err,
            TimeclockError::DuplicateActiveShift {
                employee_id: "emp_001".to_string(),
                date: at("00:00:00").date(),
                active_shift_id: "a".to_string(),
            }
        );
        assert_eq!(store.get_shift("b").unwrap().state, ShiftState::Pending);
    }

    #[test]
    fn test_clock_in_twice_is_state_conflict() {
        let store = store_with(vec![shift("a", "09:00:00", "13:00:00")]);
        store
            .clock_in("a", at("09:00:00"), PunchMetadata::system())
            .unwrap();
        let err = store
            .clock_in("a", at("09:01:00"), PunchMetadata::system())
            .unwrap_err();
        assert!(matches!(err, TimeclockError::StateConflict { .. }));
    }

    #[test]
    fn test_clock_out_closes_open_breaks() {
        let store = store_with(vec![shift("a", "09:00:00", "13:00:00")]);
        store
            .clock_in("a", at("09:00:00"), PunchMetadata::system())
            .unwrap();
        store
            .open_supplemental_break("a", at("10:00:00"), PunchMetadata::system())
            .unwrap();

        let finished = store
            .clock_out("a", at("10:30:00"), PunchMetadata::system())
            .unwrap();
        assert_eq!(finished.state, ShiftState::Finished);
        assert_eq!(finished.clock_out, Some(at("10:30:00")));
        assert!(store.breaks_for_shift("a").iter().all(|b| !b.is_open()));
    }

    #[test]
    fn test_clock_out_pending_shift_is_state_conflict() {
        let store = store_with(vec![shift("a", "09:00:00", "13:00:00")]);
        let err = store
            .clock_out("a", at("09:00:00"), PunchMetadata::system())
            .unwrap_err();
        assert!(matches!(err, TimeclockError::StateConflict { .. }));
    }

    #[test]
    fn test_close_prefers_mandatory_break() {
        let store = store_with(vec![shift("a", "09:00:00", "17:00:00")]);
        store
            .clock_in("a", at("09:00:00"), PunchMetadata::system())
            .unwrap();
        store
            .open_mandatory_break("a", at("13:00:00"), PunchMetadata::system())
            .unwrap();

        let resumed = store
            .close_open_break("a", at("13:30:00"), PunchMetadata::system())
            .unwrap();
        assert_eq!(resumed.state, ShiftState::Active);
        assert_eq!(resumed.break_end, Some(at("13:30:00")));
    }

    #[test]
    fn test_close_without_open_break_fails() {
        let store = store_with(vec![shift("a", "09:00:00", "17:00:00")]);
        store
            .clock_in("a", at("09:00:00"), PunchMetadata::system())
            .unwrap();
        let err = store
            .close_open_break("a", at("10:00:00"), PunchMetadata::system())
            .unwrap_err();
        assert_eq!(
            err,
            TimeclockError::NoOpenBreak {
                shift_id: "a".to_string()
            }
        );
    }

    #[test]
    fn test_absence_note_created_once() {
        let store = store_with(vec![shift("a", "09:00:00", "13:00:00")]);
        let (first, created) = store
            .create_absence_note_if_absent("a", "late".to_string(), at("10:30:00"))
            .unwrap();
        assert!(created);

        let (second, created) = store
            .create_absence_note_if_absent("a", "late again".to_string(), at("10:31:00"))
            .unwrap();
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(second.status, AbsenceNoteStatus::Pending);
    }

    #[test]
    fn test_supplemental_breaks_counted_per_day() {
        let store = store_with(vec![
            shift("a", "09:00:00", "13:00:00"),
            shift("b", "13:00:00", "17:00:00"),
        ]);
        let punch = PunchMetadata {
            actor: Actor::user("emp_001"),
            location: None,
            network: Default::default(),
        };
        store.clock_in("a", at("09:00:00"), punch.clone()).unwrap();
        store
            .open_supplemental_break("a", at("10:00:00"), punch.clone())
            .unwrap();
        store.close_open_break("a", at("10:10:00"), punch.clone()).unwrap();
        store.clock_out("a", at("13:00:00"), punch.clone()).unwrap();
        store.clock_in("b", at("13:00:00"), punch.clone()).unwrap();
        store
            .open_supplemental_break("b", at("14:00:00"), punch)
            .unwrap();

        assert_eq!(store.supplemental_breaks_on("emp_001", at("00:00:00").date()), 2);
    }

    #[test]
    fn test_find_successor_matches_boundary() {
        let store = store_with(vec![
            shift("a", "09:00:00", "13:00:00"),
            shift("b", "13:00:00", "17:00:00"),
        ]);
        let a = store.get_shift("a").unwrap();
        let b = store.get_shift("b").unwrap();
        assert_eq!(store.find_successor(&a).map(|s| s.id), Some("b".to_string()));
        assert!(store.find_successor(&b).is_none());
    }

    #[test]
    fn test_find_successor_skips_started_shifts_and_breaks_ties_by_id() {
        let store = store_with(vec![
            shift("a", "09:00:00", "13:00:00"),
            shift("d", "13:00:00", "17:00:00"),
            shift("c", "13:00:00", "16:00:00"),
            shift("b", "13:00:00", "15:00:00"),
        ]);
        store
            .clock_in("b", at("08:00:00"), PunchMetadata::system())
            .unwrap();
        store
            .clock_out("b", at("08:30:00"), PunchMetadata::system())
            .unwrap();

        let a = store.get_shift("a").unwrap();
        for _ in 0..10 {
            assert_eq!(store.find_successor(&a).map(|s| s.id), Some("c".to_string()));
        }
    }

    #[test]
    fn test_concurrent_clock_ins_admit_exactly_one() {
        let starts = ["06:00:00", "08:00:00", "10:00:00", "12:00:00", "14:00:00", "16:00:00"];
        let store = store_with(
            starts
                .iter()
                .enumerate()
                .map(|(i, start)| {
                    let end = (at(start) + chrono::Duration::hours(2)).format("%H:%M:%S").to_string();
                    shift(&format!("s{}", i), start, &end)
                })
                .collect(),
        );
        let barrier = Arc::new(std::sync::Barrier::new(starts.len()));

        let handles: Vec<_> = (0..starts.len())
            .map(|i| {
                let store = store.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    store.clock_in(&format!("s{}", i), at("09:00:00"), PunchMetadata::system())
                })
            })
            .collect();
        let results: Vec<TimeclockResult<Shift>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let started: Vec<&Shift> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(started.len(), 1);
        let winner = started[0].id.clone();
        for result in &results {
            match result {
                Ok(_) => {}
                Err(TimeclockError::DuplicateActiveShift {
                    active_shift_id, ..
                }) => assert_eq!(active_shift_id, &winner),
                Err(other) => panic!("Expected DuplicateActiveShift, got {:?}", other),
            }
        }

        let running = store
            .shifts_for_employee_on("emp_001", at("00:00:00").date())
            .into_iter()
            .filter(|s| s.state.is_running())
            .count();
        assert_eq!(running, 1);
    }
}
