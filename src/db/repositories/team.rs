use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::db::error::StoreResult;
use crate::db::validation::{TEAM_CODE_LEN, TEAM_NAME_LEN, validate_len};
use crate::entities::{prelude::*, teams};

pub use crate::entities::teams::Model as Team;

pub struct TeamRepository {
    conn: DatabaseConnection,
}

impl TeamRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, name: &str, code: &str) -> StoreResult<Team> {
        let name = name.trim();
        let code = code.trim().to_uppercase();
        validate_len("Team name", name, &TEAM_NAME_LEN)?;
        validate_len("Team code", &code, &TEAM_CODE_LEN)?;

        let team = teams::ActiveModel {
            name: Set(name.to_string()),
            code: Set(code),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(team_id = team.id, code = %team.code, "Created team");
        Ok(team)
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<Team>> {
        Ok(Teams::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(&self) -> StoreResult<Vec<Team>> {
        Ok(Teams::find()
            .order_by_asc(teams::Column::Name)
            .all(&self.conn)
            .await?)
    }
}
