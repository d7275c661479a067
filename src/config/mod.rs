//! Configuration loading for the Shift Timeclock Engine.
//!
//! This module loads the shift policy (lateness thresholds and break rules)
//! from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use shift_timeclock::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!(
//!     "Major absence after {} minutes",
//!     config.policy().lateness.major_absence_minutes
//! );
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BreakPolicy, LatenessPolicy, ShiftPolicy};
