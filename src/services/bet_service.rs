//! Domain service for placing bets and viewing matches with their tiers.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::db::{Bet, Fixture, MatchFilter, StoreError};
use crate::scoring::{Score, Tier, classify};

#[derive(Debug, Error)]
pub enum BetError {
    #[error("Match {0} not found")]
    MatchNotFound(i32),

    #[error("Betting on match {0} closed at kickoff")]
    Expired(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for BetError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Database(other.to_string()),
        }
    }
}

/// Result of [`BetService::place_bet`].
#[derive(Debug, Clone)]
pub struct PlacedBet {
    pub bet: Bet,
    /// `false` when an existing bet was overwritten.
    pub created: bool,
}

/// A match as seen by one user: their bet, if any, and how it scored.
#[derive(Debug, Clone)]
pub struct MatchCard {
    pub fixture: Fixture,
    pub bet: Option<Score>,
    pub tier: Tier,
    pub expired: bool,
}

impl MatchCard {
    #[must_use]
    pub fn new(fixture: Fixture, bet: Option<&Bet>, now: DateTime<Utc>) -> Self {
        let bet = bet.map(Bet::score);
        Self {
            tier: classify(bet, fixture.result),
            expired: crate::display::expired(fixture.kickoff, now),
            bet,
            fixture,
        }
    }
}

#[async_trait::async_trait]
pub trait BetService: Send + Sync {
    /// Creates the user's bet on a match, or replaces it if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::Expired`] once the match has kicked off and
    /// [`BetError::Validation`] for goals outside 0..=20.
    async fn place_bet(
        &self,
        user_id: i32,
        match_id: i32,
        goals_home: i32,
        goals_away: i32,
    ) -> Result<PlacedBet, BetError>;

    async fn match_cards(&self, user_id: i32, filter: MatchFilter)
    -> Result<Vec<MatchCard>, BetError>;

    async fn match_card(&self, user_id: i32, match_id: i32) -> Result<MatchCard, BetError>;

    async fn list_bets(&self, user_id: i32) -> Result<Vec<Bet>, BetError>;
}
