//! Domain service for reference data: teams, match types, matches and results.

use thiserror::Error;

use crate::db::{Fixture, MatchFilter, MatchType, NewMatch, StoreError, Team};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for FixtureError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => Self::Validation(msg),
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::MissingReference(what) => Self::UnknownReference(what),
            StoreError::Duplicate(what) => Self::Conflict(what),
            other => Self::Database(other.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait FixtureService: Send + Sync {
    async fn create_team(&self, name: &str, code: &str) -> Result<Team, FixtureError>;

    async fn list_teams(&self) -> Result<Vec<Team>, FixtureError>;

    async fn create_match_type(&self, code: &str, name: &str) -> Result<MatchType, FixtureError>;

    async fn list_match_types(&self) -> Result<Vec<MatchType>, FixtureError>;

    /// Schedules a match.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownReference`] when a team or match type
    /// does not exist.
    async fn create_match(&self, new: NewMatch) -> Result<Fixture, FixtureError>;

    /// Records the final score, making the match's bets scoreable.
    async fn record_result(&self, match_id: i32, home: i32, away: i32)
    -> Result<Fixture, FixtureError>;

    async fn get_fixture(&self, match_id: i32) -> Result<Fixture, FixtureError>;

    async fn list_fixtures(&self, filter: MatchFilter) -> Result<Vec<Fixture>, FixtureError>;
}
