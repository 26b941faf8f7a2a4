use axum::{
    Json,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, ApiResponse, AppState, MessageResponse, observability};
use crate::db::User;

/// Session key holding the authenticated user's id.
pub const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub email_confirmed: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            email_confirmed: user.email_confirmed,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests whose session carries no user.
pub async fn auth_middleware(
    session: Session,
    request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    if let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await {
        observability::record_user(&request, user_id);
        return Ok(next.run(request).await);
    }

    Err(ApiError::Unauthorized("Not authenticated".to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let registration = state
        .auth_service()
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    start_session(&session, registration.user.id).await?;

    tracing::info!(user_id = registration.user.id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(registration.user.into())),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    start_session(&session, user.id).await?;

    Ok(Json(ApiResponse::success(user.into())))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to end session");
        return Err(ApiError::internal(format!("Failed to end session: {e}")));
    }
    Ok(Json(ApiResponse::success(MessageResponse::new("Logged out"))))
}

/// POST /auth/confirm/{token}
pub async fn confirm_email(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.auth_service().confirm_email(&token).await?;
    tracing::info!(user_id = user.id, "Email confirmed");
    Ok(Json(ApiResponse::success(user.into())))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;
    let user = state.auth_service().get_user(user_id).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

/// PUT /auth/me
pub async fn update_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user_id = session_user_id(&session).await?;
    let user = state
        .auth_service()
        .update_name(user_id, &payload.name)
        .await?;
    Ok(Json(ApiResponse::success(user.into())))
}

// ============================================================================
// Helpers
// ============================================================================

async fn start_session(session: &Session, user_id: i32) -> Result<(), ApiError> {
    // New id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;
    session
        .insert(SESSION_USER_KEY, user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}

/// Get the user id from the session, returns error if not authenticated
pub(super) async fn session_user_id(session: &Session) -> Result<i32, ApiError> {
    session
        .get::<i32>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
