//! `SeaORM` implementation of the `FixtureService` trait.

use async_trait::async_trait;

use crate::db::{Fixture, MatchFilter, MatchType, NewMatch, Store, Team};
use crate::services::fixture_service::{FixtureError, FixtureService};

pub struct SeaOrmFixtureService {
    store: Store,
}

impl SeaOrmFixtureService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FixtureService for SeaOrmFixtureService {
    async fn create_team(&self, name: &str, code: &str) -> Result<Team, FixtureError> {
        Ok(self.store.create_team(name, code).await?)
    }

    async fn list_teams(&self) -> Result<Vec<Team>, FixtureError> {
        Ok(self.store.list_teams().await?)
    }

    async fn create_match_type(&self, code: &str, name: &str) -> Result<MatchType, FixtureError> {
        Ok(self.store.create_match_type(code, name).await?)
    }

    async fn list_match_types(&self) -> Result<Vec<MatchType>, FixtureError> {
        Ok(self.store.list_match_types().await?)
    }

    async fn create_match(&self, new: NewMatch) -> Result<Fixture, FixtureError> {
        for team_id in [new.home_team_id, new.away_team_id] {
            if self.store.get_team(team_id).await?.is_none() {
                return Err(FixtureError::UnknownReference(format!("team {team_id}")));
            }
        }
        if self.store.get_match_type(new.match_type_id).await?.is_none() {
            return Err(FixtureError::UnknownReference(format!(
                "match type {}",
                new.match_type_id
            )));
        }

        let created = self.store.create_match(new).await?;
        self.get_fixture(created.id).await
    }

    async fn record_result(
        &self,
        match_id: i32,
        home: i32,
        away: i32,
    ) -> Result<Fixture, FixtureError> {
        self.store.record_match_result(match_id, home, away).await?;
        self.get_fixture(match_id).await
    }

    async fn get_fixture(&self, match_id: i32) -> Result<Fixture, FixtureError> {
        self.store
            .get_fixture(match_id)
            .await?
            .ok_or_else(|| FixtureError::NotFound(format!("Match {match_id}")))
    }

    async fn list_fixtures(&self, filter: MatchFilter) -> Result<Vec<Fixture>, FixtureError> {
        Ok(self.store.list_fixtures(filter).await?)
    }
}
