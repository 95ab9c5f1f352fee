//! Unique test data built from ULIDs so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("team");
/// let b = unique_str("team");
/// assert_ne!(a, b);
/// assert!(a.starts_with("team-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Human-looking unique name, e.g. `Lions 01J9...`, that still slugifies to something distinct.
///
/// ```
/// use backend_test_support::unique_helpers::unique_name;
///
/// let name = unique_name("Lions");
/// assert!(name.starts_with("Lions "));
/// assert_ne!(name, unique_name("Lions"));
/// ```
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Ulid::new())
}
