//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod matches;
pub mod players;
pub mod sports;
pub mod teams;
