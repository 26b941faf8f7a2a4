use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(unique)]
    pub email: Option<String>,

    /// Argon2id password hash, absent for accounts created through an external provider
    pub password_hash: Option<String>,

    #[sea_orm(unique)]
    pub facebook_id: Option<String>,

    #[sea_orm(unique)]
    pub google_id: Option<String>,

    pub email_confirmed: bool,

    /// Single-use UUID, cleared once the address is confirmed
    #[sea_orm(unique)]
    pub email_confirm_token: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bets::Entity")]
    Bets,
}

impl Related<super::bets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
