use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::services::Standing;

/// GET /leaderboard
pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Standing>>>, ApiError> {
    let standings = state.leaderboard_service().standings().await?;
    Ok(Json(ApiResponse::success(standings)))
}
