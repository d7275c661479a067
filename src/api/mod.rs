//! HTTP API module for the Shift Timeclock Engine.
//!
//! This module exposes the two operations the UI needs: today's status for
//! an employee, and a single endpoint for every shift action.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ActionRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
