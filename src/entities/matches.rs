use sea_orm::entity::prelude::*;

use crate::scoring::Score;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kickoff: DateTimeUtc,
    pub goals_home: Option<i32>,
    pub goals_away: Option<i32>,
    pub home_team_id: i32,
    pub away_team_id: i32,
    pub match_type_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::HomeTeamId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::AwayTeamId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    AwayTeam,
    #[sea_orm(
        belongs_to = "super::match_types::Entity",
        from = "Column::MatchTypeId",
        to = "super::match_types::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    MatchType,
    #[sea_orm(has_many = "super::bets::Entity")]
    Bets,
}

impl Related<super::match_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchType.def()
    }
}

impl Related<super::bets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bets.def()
    }
}

impl Model {
    /// Final score, `None` until both sides are recorded.
    #[must_use]
    pub const fn result(&self) -> Option<Score> {
        Score::from_parts(self.goals_home, self.goals_away)
    }
}

impl ActiveModelBehavior for ActiveModel {}
