//! Shift Timeclock Engine
//!
//! This crate tracks the lifecycle of scheduled work shifts: clock-in and
//! clock-out, mandatory and supplemental breaks, lateness detection with
//! absence notes, and the automatic handoff between contiguous shifts of the
//! same employee.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod jobs;
pub mod models;
pub mod ports;
pub mod services;
pub mod store;
