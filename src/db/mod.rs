use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::matches;

pub mod error;
pub mod migrator;
pub mod repositories;
pub mod validation;

pub use error::{StoreError, StoreResult};
pub use repositories::bet::Bet;
pub use repositories::match_type::MatchType;
pub use repositories::matches::{Fixture, MatchFilter, NewMatch};
pub use repositories::team::Team;
pub use repositories::user::{ExternalProvider, NewUser, User};

/// Handle to the pool database. Cheap to clone; every component that needs
/// persistence receives one explicitly.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// The underlying sqlx pool, shared with the session store.
    #[must_use]
    pub fn sqlite_pool(&self) -> sea_orm::sqlx::SqlitePool {
        self.conn.get_sqlite_connection_pool().clone()
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn team_repo(&self) -> repositories::team::TeamRepository {
        repositories::team::TeamRepository::new(self.conn.clone())
    }

    fn match_type_repo(&self) -> repositories::match_type::MatchTypeRepository {
        repositories::match_type::MatchTypeRepository::new(self.conn.clone())
    }

    fn match_repo(&self) -> repositories::matches::MatchRepository {
        repositories::matches::MatchRepository::new(self.conn.clone())
    }

    fn bet_repo(&self) -> repositories::bet::BetRepository {
        repositories::bet::BetRepository::new(self.conn.clone())
    }

    pub async fn create_user(
        &self,
        new: NewUser<'_>,
        security: &SecurityConfig,
    ) -> StoreResult<User> {
        self.user_repo().create(new, security).await
    }

    pub async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn verify_user_password(
        &self,
        email: &str,
        password: &str,
    ) -> StoreResult<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn update_user_name(&self, id: i32, name: &str) -> StoreResult<User> {
        self.user_repo().update_name(id, name).await
    }

    pub async fn confirm_email(&self, token: &str) -> StoreResult<Option<User>> {
        self.user_repo().confirm_email(token).await
    }

    pub async fn get_confirm_token(&self, user_id: i32) -> StoreResult<Option<String>> {
        self.user_repo().get_confirm_token(user_id).await
    }

    pub async fn link_external_identity(
        &self,
        user_id: i32,
        provider: ExternalProvider,
        external_id: &str,
    ) -> StoreResult<User> {
        self.user_repo()
            .link_external(user_id, provider, external_id)
            .await
    }

    pub async fn find_user_by_external(
        &self,
        provider: ExternalProvider,
        external_id: &str,
    ) -> StoreResult<Option<User>> {
        self.user_repo()
            .find_by_external(provider, external_id)
            .await
    }

    pub async fn create_team(&self, name: &str, code: &str) -> StoreResult<Team> {
        self.team_repo().create(name, code).await
    }

    pub async fn get_team(&self, id: i32) -> StoreResult<Option<Team>> {
        self.team_repo().get(id).await
    }

    pub async fn list_teams(&self) -> StoreResult<Vec<Team>> {
        self.team_repo().list().await
    }

    pub async fn create_match_type(&self, code: &str, name: &str) -> StoreResult<MatchType> {
        self.match_type_repo().create(code, name).await
    }

    pub async fn get_match_type(&self, id: i32) -> StoreResult<Option<MatchType>> {
        self.match_type_repo().get(id).await
    }

    pub async fn list_match_types(&self) -> StoreResult<Vec<MatchType>> {
        self.match_type_repo().list().await
    }

    pub async fn create_match(&self, new: NewMatch) -> StoreResult<matches::Model> {
        self.match_repo().create(new).await
    }

    pub async fn get_match(&self, id: i32) -> StoreResult<Option<matches::Model>> {
        self.match_repo().get(id).await
    }

    pub async fn get_fixture(&self, id: i32) -> StoreResult<Option<Fixture>> {
        self.match_repo().get_detailed(id).await
    }

    pub async fn list_fixtures(&self, filter: MatchFilter) -> StoreResult<Vec<Fixture>> {
        self.match_repo().list_detailed(filter).await
    }

    pub async fn record_match_result(
        &self,
        id: i32,
        home: i32,
        away: i32,
    ) -> StoreResult<matches::Model> {
        self.match_repo().record_result(id, home, away).await
    }

    pub async fn insert_bet(
        &self,
        user_id: i32,
        match_id: i32,
        goals_home: i32,
        goals_away: i32,
    ) -> StoreResult<Bet> {
        self.bet_repo()
            .insert(user_id, match_id, goals_home, goals_away)
            .await
    }

    pub async fn update_bet(&self, id: i32, goals_home: i32, goals_away: i32) -> StoreResult<Bet> {
        self.bet_repo().update(id, goals_home, goals_away).await
    }

    pub async fn get_bet(&self, user_id: i32, match_id: i32) -> StoreResult<Option<Bet>> {
        self.bet_repo().get_for_user_match(user_id, match_id).await
    }

    pub async fn list_bets_for_user(&self, user_id: i32) -> StoreResult<Vec<Bet>> {
        self.bet_repo().list_for_user(user_id).await
    }

    pub async fn bets_by_match_for_user(&self, user_id: i32) -> StoreResult<HashMap<i32, Bet>> {
        self.bet_repo().by_match_for_user(user_id).await
    }

    pub async fn list_bets_on_played_matches(&self) -> StoreResult<Vec<(Bet, matches::Model)>> {
        self.bet_repo().list_on_played_matches().await
    }
}
