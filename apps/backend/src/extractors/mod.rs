pub mod form_data;
pub mod path_id;
pub mod validated_json;

pub use form_data::FormData;
pub use path_id::PathId;
pub use validated_json::ValidatedJson;
