//! Application state for the Shift Timeclock Engine API.

use std::sync::Arc;

use crate::services::ShiftController;

/// Shared application state.
///
/// Holds the controller every handler delegates to. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    controller: Arc<ShiftController>,
}

impl AppState {
    /// Creates a new application state around a wired controller.
    pub fn new(controller: ShiftController) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }

    /// Returns a reference to the shift controller.
    pub fn controller(&self) -> &ShiftController {
        &self.controller
    }
}
