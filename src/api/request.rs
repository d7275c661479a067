//! Request types for the Shift Timeclock Engine API.

use serde::{Deserialize, Serialize};

use crate::models::GeoLocation;
use crate::services::ShiftAction;

/// Request body for `POST /shifts/{shift_id}/actions`.
///
/// The caller's IP and user agent are not part of the body; they are read
/// from the `X-Forwarded-For` and `User-Agent` headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The action to perform.
    pub action: ShiftAction,
    /// Where the device was when the action was taken.
    pub location: GeoLocation,
    /// The acting user. Defaults to the shift's employee.
    #[serde(default)]
    pub user_id: Option<String>,
}
