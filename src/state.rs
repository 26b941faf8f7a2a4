use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, BetService, FixtureService, LeaderboardService, SeaOrmAuthService,
    SeaOrmBetService, SeaOrmFixtureService, SeaOrmLeaderboardService,
};

/// Everything the HTTP layer and the CLI need, wired once at startup.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub bet_service: Arc<dyn BetService>,

    pub fixture_service: Arc<dyn FixtureService>,

    pub leaderboard_service: Arc<dyn LeaderboardService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        let bet_service = Arc::new(SeaOrmBetService::new(store.clone()))
            as Arc<dyn BetService + Send + Sync + 'static>;

        let fixture_service = Arc::new(SeaOrmFixtureService::new(store.clone()))
            as Arc<dyn FixtureService + Send + Sync + 'static>;

        let leaderboard_service = Arc::new(SeaOrmLeaderboardService::new(store.clone()))
            as Arc<dyn LeaderboardService + Send + Sync + 'static>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            bet_service,
            fixture_service,
            leaderboard_service,
        }
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
