use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MatchTypeDto, TeamDto};

/// GET /teams
pub async fn list_teams(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TeamDto>>>, ApiError> {
    let teams = state.fixture_service().list_teams().await?;
    Ok(Json(ApiResponse::success(
        teams.into_iter().map(TeamDto::from).collect(),
    )))
}

/// GET /match-types
pub async fn list_match_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<MatchTypeDto>>>, ApiError> {
    let types = state.fixture_service().list_match_types().await?;
    Ok(Json(ApiResponse::success(
        types.into_iter().map(MatchTypeDto::from).collect(),
    )))
}
