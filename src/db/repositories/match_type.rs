use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::db::error::StoreResult;
use crate::db::validation::{MATCH_TYPE_CODE_LEN, MATCH_TYPE_NAME_LEN, validate_len};
use crate::entities::{match_types, prelude::*};

pub use crate::entities::match_types::Model as MatchType;

pub struct MatchTypeRepository {
    conn: DatabaseConnection,
}

impl MatchTypeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, code: &str, name: &str) -> StoreResult<MatchType> {
        let code = code.trim();
        let name = name.trim();
        validate_len("Match type code", code, &MATCH_TYPE_CODE_LEN)?;
        validate_len("Match type name", name, &MATCH_TYPE_NAME_LEN)?;

        let match_type = match_types::ActiveModel {
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(match_type_id = match_type.id, code = %match_type.code, "Created match type");
        Ok(match_type)
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<MatchType>> {
        Ok(MatchTypes::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn list(&self) -> StoreResult<Vec<MatchType>> {
        Ok(MatchTypes::find()
            .order_by_asc(match_types::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
