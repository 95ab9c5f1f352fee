//! DTOs for teams_sea adapter.

/// Column values written on create and on update.
///
/// The slug has already been disambiguated by the caller.
#[derive(Debug, Clone, Default)]
pub struct TeamWrite {
    pub name: String,
    pub city: String,
    pub founded: Option<i32>,
    pub logo: Option<String>,
    pub slug: String,
    pub sport_id: Option<i64>,
}
