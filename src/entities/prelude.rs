pub use super::bets::Entity as Bets;
pub use super::match_types::Entity as MatchTypes;
pub use super::matches::Entity as Matches;
pub use super::teams::Entity as Teams;
pub use super::users::Entity as Users;
