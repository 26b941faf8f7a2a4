use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::SameSite};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
mod bets;
mod error;
mod fixtures;
mod health;
mod leaderboard;
mod matches;
mod observability;
mod types;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn bet_service(&self) -> &Arc<dyn crate::services::BetService> {
        &self.shared.bet_service
    }

    #[must_use]
    pub fn fixture_service(&self) -> &Arc<dyn crate::services::FixtureService> {
        &self.shared.fixture_service
    }

    #[must_use]
    pub fn leaderboard_service(&self) -> &Arc<dyn crate::services::LeaderboardService> {
        &self.shared.leaderboard_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Session store backed by the application database.
async fn session_store(state: &AppState) -> anyhow::Result<SqliteStore> {
    let store = SqliteStore::new(state.store().sqlite_pool());
    store.migrate().await?;
    Ok(store)
}

pub async fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let server = state.config().read().await.server.clone();

    let session_layer = SessionManagerLayer::new(session_store(&state).await?)
        .with_name(server.session_cookie_name.clone())
        .with_secure(server.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let protected_routes = create_protected_router();

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/confirm/{token}", post(auth::confirm_email))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    let mut app = Router::new().nest("/api", api_router);

    if !server.static_path.is_empty() {
        app = app.fallback_service(ServeDir::new(&server.static_path));
    }

    if server.compression {
        app = app.layer(CompressionLayer::new());
    }

    Ok(app
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware)))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/me", put(auth::update_current_user))
        .route("/matches", get(matches::list_matches))
        .route("/matches/{id}", get(matches::get_match))
        .route("/matches/{id}/bet", put(matches::place_bet))
        .route("/bets", get(bets::list_bets))
        .route("/teams", get(fixtures::list_teams))
        .route("/match-types", get(fixtures::list_match_types))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
