//! Ports to the collaborators the engine consumes but does not own.
//!
//! The engine reads the current time through [`Clock`], publishes lateness
//! events through [`EventSink`], and resolves employees and contracts through
//! [`EmployeeDirectory`]. Each port ships with a production adapter and an
//! in-memory adapter for tests.

mod clock;
mod directory;
mod events;

pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{EmployeeDirectory, InMemoryEmployeeDirectory};
pub use events::{EventSink, InMemoryEventSink, TracingEventSink};
