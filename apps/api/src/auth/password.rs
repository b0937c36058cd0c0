use axum::Json;
use axum::extract::State;
use rolegate_core::AppError;
use tower_sessions::Session;

use crate::dto::{ApiEnvelope, LoginRequest, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_USER_KEY;

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<ApiEnvelope<UserResponse>>> {
    let identity = state
        .session_service
        .login(&payload.email, &payload.password)
        .await?;
    let user = state.directory_service.resolve_actor(&identity).await?;

    // Regenerate the session id on privilege change.
    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    Ok(Json(
        ApiEnvelope::data(UserResponse::from(&user)).with_message("Logged in successfully"),
    ))
}
