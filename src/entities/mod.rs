pub mod prelude;

pub mod bets;
pub mod match_types;
pub mod matches;
pub mod teams;
pub mod users;
