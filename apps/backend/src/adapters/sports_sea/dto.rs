//! DTOs for sports_sea adapter.

/// Validated values for a new sport; `slug` is already unique.
#[derive(Debug, Clone)]
pub struct SportCreate {
    pub name: String,
    pub slug: String,
}

impl SportCreate {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }
}
