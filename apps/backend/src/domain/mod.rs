//! Domain layer: league rules that need no database or HTTP.

pub mod dates;
pub mod listing;
pub mod matches;
pub mod pagination;
pub mod players;
pub mod positions;
pub mod slug;
pub mod validation;

pub use listing::{SportSelector, TemporalFilter};
pub use matches::Winner;
pub use pagination::{Page, PageRequest, PageWindow};
pub use validation::FieldErrors;
