//! Domain services: validation against the store, then persistence.
//!
//! Every method takes the connection (usually the request transaction) and
//! returns `DomainError`; handlers convert to `AppError`.

pub mod matches;
pub mod players;
pub mod sports;
pub mod teams;

use tracing::debug;

use crate::domain::validation::FieldErrors;
use crate::errors::domain::DomainError;

/// `Err(Validation)` when anything was collected, logged at debug.
pub(crate) fn reject_if_any(entity: &'static str, errors: FieldErrors) -> Result<(), DomainError> {
    if errors.is_empty() {
        return Ok(());
    }
    debug!(entity, errors = %errors.summary(), "Validation rejected submission");
    Err(DomainError::Validation(errors))
}

/// Order-preserving dedup of ids.
pub(crate) fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
