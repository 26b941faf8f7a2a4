use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;
use tracing::info;

use crate::db::error::{StoreError, StoreResult};
use crate::db::validation::validate_result_goals;
use crate::entities::{match_types, matches, prelude::*, teams};
use crate::scoring::Score;

#[derive(Debug, Clone, Copy)]
pub struct NewMatch {
    pub kickoff: DateTime<Utc>,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub match_type_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFilter {
    #[default]
    All,
    /// Kickoff strictly after the given instant.
    Upcoming(DateTime<Utc>),
    /// Both result columns recorded.
    Played,
}

/// A match joined with its teams and stage.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub id: i32,
    pub kickoff: DateTime<Utc>,
    pub result: Option<Score>,
    pub home_team: teams::Model,
    pub away_team: teams::Model,
    pub match_type: match_types::Model,
}

pub struct MatchRepository {
    conn: DatabaseConnection,
}

impl MatchRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new: NewMatch) -> StoreResult<matches::Model> {
        if new.home_team_id == new.away_team_id {
            return Err(StoreError::validation(
                "Home and away team must be different",
            ));
        }

        let now = Utc::now().to_rfc3339();
        let model = matches::ActiveModel {
            kickoff: Set(new.kickoff),
            goals_home: Set(None),
            goals_away: Set(None),
            home_team_id: Set(new.home_team_id),
            away_team_id: Set(new.away_team_id),
            match_type_id: Set(new.match_type_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(match_id = model.id, kickoff = %model.kickoff, "Created match");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<matches::Model>> {
        Ok(Matches::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_detailed(&self, id: i32) -> StoreResult<Option<Fixture>> {
        let Some(model) = self.get(id).await? else {
            return Ok(None);
        };
        Ok(self.attach_details(vec![model]).await?.pop())
    }

    pub async fn list_detailed(&self, filter: MatchFilter) -> StoreResult<Vec<Fixture>> {
        let mut query = Matches::find();
        query = match filter {
            MatchFilter::All => query,
            MatchFilter::Upcoming(now) => query.filter(matches::Column::Kickoff.gt(now)),
            MatchFilter::Played => query
                .filter(matches::Column::GoalsHome.is_not_null())
                .filter(matches::Column::GoalsAway.is_not_null()),
        };

        let models = query
            .order_by_asc(matches::Column::Kickoff)
            .order_by_asc(matches::Column::Id)
            .all(&self.conn)
            .await?;

        self.attach_details(models).await
    }

    /// Stores the final score. Both sides are written together.
    pub async fn record_result(&self, id: i32, home: i32, away: i32) -> StoreResult<matches::Model> {
        validate_result_goals(home, away)?;

        let model = Matches::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| StoreError::not_found("Match", id))?;

        let mut active: matches::ActiveModel = model.into();
        active.goals_home = Set(Some(home));
        active.goals_away = Set(Some(away));
        active.updated_at = Set(Utc::now().to_rfc3339());
        let updated = active.update(&self.conn).await?;

        info!(match_id = id, home, away, "Recorded match result");
        Ok(updated)
    }

    async fn attach_details(&self, models: Vec<matches::Model>) -> StoreResult<Vec<Fixture>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let team_ids: Vec<i32> = models
            .iter()
            .flat_map(|m| [m.home_team_id, m.away_team_id])
            .collect();
        let type_ids: Vec<i32> = models.iter().map(|m| m.match_type_id).collect();

        let teams: HashMap<i32, teams::Model> = Teams::find()
            .filter(teams::Column::Id.is_in(team_ids))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let types: HashMap<i32, match_types::Model> = MatchTypes::find()
            .filter(match_types::Column::Id.is_in(type_ids))
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        models
            .into_iter()
            .map(|m| {
                let lookup_team = |id: i32| {
                    teams
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| StoreError::MissingReference(format!("team {id}")))
                };

                Ok(Fixture {
                    id: m.id,
                    kickoff: m.kickoff,
                    result: Score::from_parts(m.goals_home, m.goals_away),
                    home_team: lookup_team(m.home_team_id)?,
                    away_team: lookup_team(m.away_team_id)?,
                    match_type: types.get(&m.match_type_id).cloned().ok_or_else(|| {
                        StoreError::MissingReference(format!("match type {}", m.match_type_id))
                    })?,
                })
            })
            .collect()
    }
}
