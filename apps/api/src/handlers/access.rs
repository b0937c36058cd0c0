use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use rolegate_application::{AccessGate, AuthenticationStatus};
use rolegate_domain::{AdminView, admin_navigation};
use tower_sessions::Session;

use crate::auth::optional_session_user;
use crate::dto::{ApiEnvelope, NavigationEntryResponse, ViewAccessResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Menu entries visible to the caller; empty when nobody is signed in.
pub async fn navigation_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<ApiEnvelope<Vec<NavigationEntryResponse>>>> {
    let user = optional_session_user(&state, &session).await?;
    let status = AuthenticationStatus::from_current_user(user.as_ref());

    let entries = AccessGate::navigation(&status, &admin_navigation())
        .into_iter()
        .map(NavigationEntryResponse::from)
        .collect();

    Ok(Json(ApiEnvelope::data(entries)))
}

/// Gate decision for a named view. Unauthenticated callers get a decision
/// asking for sign-in rather than an error.
pub async fn view_access_handler(
    State(state): State<AppState>,
    session: Session,
    Path(view): Path<String>,
) -> ApiResult<Json<ApiEnvelope<ViewAccessResponse>>> {
    let view = AdminView::from_str(&view)?;
    let user = optional_session_user(&state, &session).await?;
    let status = AuthenticationStatus::from_current_user(user.as_ref());

    let decision = AccessGate::evaluate(&status, &[view.required_permission()]);

    Ok(Json(ApiEnvelope::data(ViewAccessResponse::new(
        view, decision,
    ))))
}
