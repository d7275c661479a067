//! Configuration types for shift policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `policy.yaml`.

use chrono::Duration;
use serde::Deserialize;

/// Lateness thresholds, in minutes after the scheduled start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatenessPolicy {
    /// Delays strictly above this are a significant delay.
    pub significant_delay_minutes: i64,
    /// Delays strictly above this are a major absence.
    pub major_absence_minutes: i64,
}

impl Default for LatenessPolicy {
    fn default() -> Self {
        Self {
            significant_delay_minutes: 15,
            major_absence_minutes: 60,
        }
    }
}

/// Break eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BreakPolicy {
    /// Worked minutes after which the mandatory break may start.
    pub mandatory_trigger_minutes: i64,
    /// Supplemental breaks allowed per employee per calendar day.
    pub supplemental_daily_quota: usize,
}

impl BreakPolicy {
    /// The mandatory-break trigger as a duration.
    pub fn mandatory_trigger(&self) -> Duration {
        Duration::minutes(self.mandatory_trigger_minutes)
    }
}

impl Default for BreakPolicy {
    fn default() -> Self {
        Self {
            mandatory_trigger_minutes: 240,
            supplemental_daily_quota: 2,
        }
    }
}

/// The complete shift policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ShiftPolicy {
    /// Lateness thresholds.
    #[serde(default)]
    pub lateness: LatenessPolicy,
    /// Break rules.
    #[serde(default)]
    pub breaks: BreakPolicy,
}
