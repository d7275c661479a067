//! Shift services: clocking, breaks, lateness and automatic transitions.
//!
//! Every service is synchronous and performs one atomic store operation per
//! call. The only asynchronous work is running queued transition jobs; see
//! [`crate::jobs`].

mod breaks;
mod clock;
mod controller;
mod lateness;
mod transition;

pub use breaks::BreakManager;
pub use clock::ClockService;
pub use controller::{EmployeeStatus, ShiftAction, ShiftController, ShiftSummary};
pub use lateness::{LatenessDetector, LatenessOutcome};
pub use transition::{TransitionHandler, TransitionOutcome, TransitionScheduler};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDateTime;

    use crate::config::ShiftPolicy;
    use crate::jobs::InMemoryJobQueue;
    use crate::models::{Employee, GeoLocation, NetworkInfo, PunchMetadata, Shift};
    use crate::ports::{FixedClock, InMemoryEmployeeDirectory, InMemoryEventSink};
    use crate::store::{InMemoryShiftStore, ShiftStore};

    use super::ShiftController;

    pub(crate) fn at(time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("2026-01-15 {}", time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    pub(crate) fn user_punch() -> PunchMetadata {
        PunchMetadata::user(
            "emp_001",
            GeoLocation {
                latitude: 40.4168,
                longitude: -3.7038,
            },
            NetworkInfo {
                ip: Some("10.0.0.7".to_string()),
                user_agent: Some("kiosk/1.0".to_string()),
            },
        )
    }

    /// All collaborators in memory, with a controller wired on top.
    pub(crate) struct Harness {
        pub store: InMemoryShiftStore,
        pub clock: FixedClock,
        pub events: InMemoryEventSink,
        pub queue: InMemoryJobQueue,
        pub controller: ShiftController,
    }

    impl Harness {
        pub(crate) fn new(now: &str) -> Self {
            Self::with_policy(now, ShiftPolicy::default())
        }

        pub(crate) fn with_policy(now: &str, policy: ShiftPolicy) -> Self {
            let store = InMemoryShiftStore::new();
            let clock = FixedClock::new(at(now));
            let events = InMemoryEventSink::new();
            let queue = InMemoryJobQueue::new();
            let directory = InMemoryEmployeeDirectory::new();
            directory.insert(Employee {
                id: "emp_001".to_string(),
                name: "Ana".to_string(),
                contract_ids: vec!["contract_001".to_string()],
            });

            let controller = ShiftController::new(
                Arc::new(store.clone()),
                Arc::new(directory),
                Arc::new(clock.clone()),
                Arc::new(events.clone()),
                Arc::new(queue.clone()),
                policy,
            );

            Self {
                store,
                clock,
                events,
                queue,
                controller,
            }
        }

        pub(crate) fn schedule(&self, id: &str, start: &str, end: &str) -> Shift {
            self.store
                .insert_shift(Shift::scheduled(
                    id,
                    "contract_001",
                    "emp_001",
                    at(start),
                    at(end),
                ))
                .unwrap()
        }

        pub(crate) fn now(&self, time_str: &str) {
            self.clock.set(at(time_str));
        }
    }
}
