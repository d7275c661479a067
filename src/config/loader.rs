//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the shift
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{TimeclockError, TimeclockResult};

use super::types::ShiftPolicy;

/// Loads and provides access to the shift policy.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── policy.yaml   # Lateness thresholds and break rules
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_timeclock::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// assert!(loader.policy().breaks.supplemental_daily_quota > 0);
/// # Ok::<(), shift_timeclock::error::TimeclockError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: ShiftPolicy,
}

impl ConfigLoader {
    /// Loads `policy.yaml` from the specified directory.
    ///
    /// Returns `ConfigNotFound` if the file is missing and
    /// `ConfigParseError` if it is not valid YAML or its thresholds are
    /// inconsistent.
    pub fn load<P: AsRef<Path>>(path: P) -> TimeclockResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| {
            TimeclockError::ConfigNotFound {
                path: path_str.clone(),
            }
        })?;

        Self::from_yaml(&path_str, &content)
    }

    /// Parses a policy from YAML text. `source` is only used in error messages.
    pub fn from_yaml(source: &str, content: &str) -> TimeclockResult<Self> {
        let policy: ShiftPolicy =
            serde_yaml::from_str(content).map_err(|e| TimeclockError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;

        Self::validate(source, &policy)?;
        Ok(Self { policy })
    }

    /// Wraps an already-built policy.
    pub fn from_policy(policy: ShiftPolicy) -> Self {
        Self { policy }
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &ShiftPolicy {
        &self.policy
    }

    fn validate(source: &str, policy: &ShiftPolicy) -> TimeclockResult<()> {
        let invalid = |message: &str| TimeclockError::ConfigParseError {
            path: source.to_string(),
            message: message.to_string(),
        };

        if policy.lateness.significant_delay_minutes < 0 {
            return Err(invalid("significant_delay_minutes must not be negative"));
        }
        if policy.lateness.major_absence_minutes <= policy.lateness.significant_delay_minutes {
            return Err(invalid(
                "major_absence_minutes must be greater than significant_delay_minutes",
            ));
        }
        if policy.breaks.mandatory_trigger_minutes < 0 {
            return Err(invalid("mandatory_trigger_minutes must not be negative"));
        }
        Ok(())
    }
}
