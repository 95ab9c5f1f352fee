//! Test helpers shared by the backend's unit and integration tests:
//! logging setup, unique names and problem-details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
