mod init;
mod leaderboard;
mod match_type;
mod matches;
mod team;

pub use init::cmd_init;
pub use leaderboard::cmd_leaderboard;
pub use match_type::{cmd_match_type_add, cmd_match_type_list};
pub use matches::{cmd_match_add, cmd_match_list, cmd_match_result, parse_kickoff};
pub use team::{cmd_team_add, cmd_team_list};
