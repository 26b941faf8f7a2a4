pub mod bet;
pub mod match_type;
pub mod matches;
pub mod team;
pub mod user;
