//! `SeaORM` implementation of the `BetService` trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::db::validation::validate_bet_goals;
use crate::db::{Bet, MatchFilter, Store, StoreError};
use crate::display::expired;
use crate::services::bet_service::{BetError, BetService, MatchCard, PlacedBet};

pub struct SeaOrmBetService {
    store: Store,
}

impl SeaOrmBetService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn overwrite_existing(
        &self,
        user_id: i32,
        match_id: i32,
        goals_home: i32,
        goals_away: i32,
    ) -> Result<Bet, BetError> {
        let existing = self
            .store
            .get_bet(user_id, match_id)
            .await?
            .ok_or_else(|| {
                BetError::Database(format!(
                    "Bet for user {user_id} on match {match_id} vanished during update"
                ))
            })?;

        Ok(self
            .store
            .update_bet(existing.id, goals_home, goals_away)
            .await?)
    }
}

#[async_trait]
impl BetService for SeaOrmBetService {
    async fn place_bet(
        &self,
        user_id: i32,
        match_id: i32,
        goals_home: i32,
        goals_away: i32,
    ) -> Result<PlacedBet, BetError> {
        validate_bet_goals(goals_home, goals_away)?;

        let game = self
            .store
            .get_match(match_id)
            .await?
            .ok_or(BetError::MatchNotFound(match_id))?;

        if expired(game.kickoff, Utc::now()) {
            return Err(BetError::Expired(match_id));
        }

        let placed = match self
            .store
            .insert_bet(user_id, match_id, goals_home, goals_away)
            .await
        {
            Ok(bet) => PlacedBet { bet, created: true },
            Err(StoreError::Duplicate(_)) => {
                debug!(user_id, match_id, "Bet exists, updating instead");
                let bet = self
                    .overwrite_existing(user_id, match_id, goals_home, goals_away)
                    .await?;
                PlacedBet {
                    bet,
                    created: false,
                }
            }
            Err(e) => return Err(e.into()),
        };

        metrics::counter!("bets_placed_total").increment(1);
        info!(
            user_id,
            match_id,
            bet = %placed.bet.score(),
            created = placed.created,
            "Bet placed"
        );

        Ok(placed)
    }

    async fn match_cards(
        &self,
        user_id: i32,
        filter: MatchFilter,
    ) -> Result<Vec<MatchCard>, BetError> {
        let fixtures = self.store.list_fixtures(filter).await?;
        let bets = self.store.bets_by_match_for_user(user_id).await?;
        let now = Utc::now();

        Ok(fixtures
            .into_iter()
            .map(|fixture| {
                let bet = bets.get(&fixture.id);
                MatchCard::new(fixture, bet, now)
            })
            .collect())
    }

    async fn match_card(&self, user_id: i32, match_id: i32) -> Result<MatchCard, BetError> {
        let fixture = self
            .store
            .get_fixture(match_id)
            .await?
            .ok_or(BetError::MatchNotFound(match_id))?;
        let bet = self.store.get_bet(user_id, match_id).await?;

        Ok(MatchCard::new(fixture, bet.as_ref(), Utc::now()))
    }

    async fn list_bets(&self, user_id: i32) -> Result<Vec<Bet>, BetError> {
        Ok(self.store.list_bets_for_user(user_id).await?)
    }
}
