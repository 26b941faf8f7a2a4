use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{FixedOffset, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::{ApiError, ApiResponse, AppState, BetDto, GoalsDto, MatchDto};
use crate::db::MatchFilter;
use crate::display::offset_from_minutes;

#[derive(Debug, Deserialize, Default)]
pub struct MatchListQuery {
    /// `upcoming`, `played`, or absent for every match.
    pub filter: Option<String>,
}

impl MatchListQuery {
    fn to_filter(&self) -> Result<MatchFilter, ApiError> {
        match self.filter.as_deref() {
            None | Some("" | "all") => Ok(MatchFilter::All),
            Some("upcoming") => Ok(MatchFilter::Upcoming(Utc::now())),
            Some("played") => Ok(MatchFilter::Played),
            Some(other) => Err(ApiError::validation(format!(
                "Unknown match filter '{other}' (expected upcoming or played)"
            ))),
        }
    }
}

async fn display_offset(state: &AppState) -> FixedOffset {
    let minutes = state.config().read().await.general.display_utc_offset_minutes;
    offset_from_minutes(minutes)
}

/// GET /matches
pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(query): Query<MatchListQuery>,
) -> Result<Json<ApiResponse<Vec<MatchDto>>>, ApiError> {
    let user_id = session_user_id(&session).await?;
    let filter = query.to_filter()?;

    let cards = state.bet_service().match_cards(user_id, filter).await?;
    let offset = display_offset(&state).await;

    let matches = cards
        .into_iter()
        .map(|card| MatchDto::from_card(card, offset))
        .collect();

    Ok(Json(ApiResponse::success(matches)))
}

/// GET /matches/{id}
pub async fn get_match(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MatchDto>>, ApiError> {
    let user_id = session_user_id(&session).await?;
    let card = state.bet_service().match_card(user_id, id).await?;
    let offset = display_offset(&state).await;

    Ok(Json(ApiResponse::success(MatchDto::from_card(card, offset))))
}

/// PUT /matches/{id}/bet
pub async fn place_bet(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<GoalsDto>,
) -> Result<(StatusCode, Json<ApiResponse<BetDto>>), ApiError> {
    let user_id = session_user_id(&session).await?;

    let placed = state
        .bet_service()
        .place_bet(user_id, id, payload.goals_home, payload.goals_away)
        .await?;

    let status = if placed.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ApiResponse::success(placed.bet.into()))))
}
