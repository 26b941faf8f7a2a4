use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

use crate::db::error::{StoreError, StoreResult};
use crate::db::validation::validate_bet_goals;
use crate::entities::{bets, matches, prelude::*};

pub use crate::entities::bets::Model as Bet;

pub struct BetRepository {
    conn: DatabaseConnection,
}

impl BetRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a new bet. A second bet for the same user and match fails with
    /// [`StoreError::Duplicate`].
    pub async fn insert(
        &self,
        user_id: i32,
        match_id: i32,
        goals_home: i32,
        goals_away: i32,
    ) -> StoreResult<Bet> {
        validate_bet_goals(goals_home, goals_away)?;

        let now = chrono::Utc::now().to_rfc3339();
        let bet = bets::ActiveModel {
            user_id: Set(user_id),
            match_id: Set(match_id),
            goals_home: Set(goals_home),
            goals_away: Set(goals_away),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| match StoreError::from(e) {
            StoreError::Duplicate(_) => StoreError::Duplicate(format!(
                "bet for user {user_id} on match {match_id}"
            )),
            other => other,
        })?;

        Ok(bet)
    }

    pub async fn update(&self, id: i32, goals_home: i32, goals_away: i32) -> StoreResult<Bet> {
        validate_bet_goals(goals_home, goals_away)?;

        let bet = Bets::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Bet", id))?;

        let mut active: bets::ActiveModel = bet.into();
        active.goals_home = Set(goals_home);
        active.goals_away = Set(goals_away);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(active.update(&self.conn).await?)
    }

    pub async fn get_for_user_match(&self, user_id: i32, match_id: i32) -> StoreResult<Option<Bet>> {
        Ok(Bets::find()
            .filter(bets::Column::UserId.eq(user_id))
            .filter(bets::Column::MatchId.eq(match_id))
            .one(&self.conn)
            .await?)
    }

    pub async fn list_for_user(&self, user_id: i32) -> StoreResult<Vec<Bet>> {
        Ok(Bets::find()
            .filter(bets::Column::UserId.eq(user_id))
            .order_by_asc(bets::Column::MatchId)
            .all(&self.conn)
            .await?)
    }

    /// The user's bets keyed by match id.
    pub async fn by_match_for_user(&self, user_id: i32) -> StoreResult<HashMap<i32, Bet>> {
        Ok(self
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(|b| (b.match_id, b))
            .collect())
    }

    /// Every bet on a match whose result has been recorded.
    pub async fn list_on_played_matches(&self) -> StoreResult<Vec<(Bet, matches::Model)>> {
        let rows = Bets::find()
            .find_also_related(Matches)
            .filter(matches::Column::GoalsHome.is_not_null())
            .filter(matches::Column::GoalsAway.is_not_null())
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(bet, game)| game.map(|g| (bet, g)))
            .collect())
    }
}
