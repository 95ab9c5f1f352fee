pub mod matches;
pub mod players;
pub mod sports;
pub mod team_sports;
pub mod teams;

pub use matches::Entity as Matches;
pub use matches::MatchStatus;
pub use matches::Model as Match;
pub use players::Entity as Players;
pub use players::Model as Player;
pub use sports::Entity as Sports;
pub use sports::Model as Sport;
pub use team_sports::Entity as TeamSports;
pub use team_sports::Model as TeamSport;
pub use teams::Entity as Teams;
pub use teams::Model as Team;
