use axum::{Json, extract::State};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState, BetDto};

/// GET /bets
pub async fn list_bets(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<BetDto>>>, ApiError> {
    let user_id = session_user_id(&session).await?;
    let bets = state.bet_service().list_bets(user_id).await?;
    Ok(Json(ApiResponse::success(
        bets.into_iter().map(BetDto::from).collect(),
    )))
}
