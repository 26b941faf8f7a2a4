pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, Registration};
pub use auth_service_impl::SeaOrmAuthService;

pub mod bet_service;
pub mod bet_service_impl;
pub use bet_service::{BetError, BetService, MatchCard, PlacedBet};
pub use bet_service_impl::SeaOrmBetService;

pub mod fixture_service;
pub mod fixture_service_impl;
pub use fixture_service::{FixtureError, FixtureService};
pub use fixture_service_impl::SeaOrmFixtureService;

pub mod leaderboard;
pub use leaderboard::{LeaderboardService, SeaOrmLeaderboardService, Standing, compute_standings};
