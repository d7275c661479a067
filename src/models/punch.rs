//! Punch metadata captured with every shift mutation.
//!
//! Each clock-in, clock-out, break start and break end records where it
//! happened, which network it came from, and who (or what) performed it.

use serde::{Deserialize, Serialize};

/// Who performed a shift mutation.
///
/// # Example
///
/// ```
/// use shift_timeclock::models::Actor;
///
/// let actor = Actor::user("emp_001");
/// assert!(!actor.is_system());
/// assert!(Actor::System.is_system());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    /// A human acting through the UI.
    User {
        /// The acting user's ID.
        user_id: String,
    },
    /// The system itself, e.g. an automatic shift handoff.
    System,
}

impl Actor {
    /// Creates a human actor.
    pub fn user(user_id: impl Into<String>) -> Self {
        Actor::User {
            user_id: user_id.into(),
        }
    }

    /// Returns true for system-generated actions.
    pub fn is_system(&self) -> bool {
        matches!(self, Actor::System)
    }
}

/// A latitude/longitude pair reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

/// Network details supplied by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// The caller's IP address.
    #[serde(default)]
    pub ip: Option<String>,
    /// The caller's user agent string.
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Everything recorded alongside a single shift mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchMetadata {
    /// Who performed the action.
    pub actor: Actor,
    /// Device location, absent for system-generated actions.
    #[serde(default)]
    pub location: Option<GeoLocation>,
    /// Caller network metadata.
    #[serde(default)]
    pub network: NetworkInfo,
}

impl PunchMetadata {
    /// Metadata for an action taken by a person at a known location.
    pub fn user(user_id: impl Into<String>, location: GeoLocation, network: NetworkInfo) -> Self {
        Self {
            actor: Actor::user(user_id),
            location: Some(location),
            network,
        }
    }

    /// Metadata for a system-generated action, which has no location.
    pub fn system() -> Self {
        Self {
            actor: Actor::System,
            location: None,
            network: NetworkInfo::default(),
        }
    }
}
