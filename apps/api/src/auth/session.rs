use axum::Json;
use axum::extract::{Extension, State};
use rolegate_core::AppError;
use rolegate_domain::User;
use tower_sessions::Session;

use crate::dto::{ApiEnvelope, SessionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn logout_handler(session: Session) -> ApiResult<Json<ApiEnvelope<()>>> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(Json(ApiEnvelope::message("Logged out successfully")))
}

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> Json<ApiEnvelope<SessionResponse>> {
    let current = state.session_service.current_session(actor);

    Json(ApiEnvelope::data(SessionResponse::from(current)))
}
