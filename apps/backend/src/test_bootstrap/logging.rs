#![cfg(test)]

//! Logging for the crate's own unit tests; integration tests call the same
//! initializer through `tests/common`.

/// Idempotent. `TEST_LOG` (or `RUST_LOG`) raises the level above `warn`.
pub fn init() {
    backend_test_support::logging::init();
}
