use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use rolegate_domain::{RoleId, User};

use crate::dto::{ApiEnvelope, CreateRoleRequest, NamedEntryRequest, RoleResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<ApiEnvelope<Vec<RoleResponse>>>> {
    let roles = state
        .directory_service
        .list_roles(&actor)
        .await?
        .iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(ApiEnvelope::data(roles)))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<RoleResponse>>)> {
    let role = state
        .directory_service
        .create_role(&actor, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiEnvelope::data(RoleResponse::from(&role)).with_message("Role created successfully"),
        ),
    ))
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(role_id): Path<i64>,
    Json(payload): Json<NamedEntryRequest>,
) -> ApiResult<Json<ApiEnvelope<RoleResponse>>> {
    let role = state
        .directory_service
        .update_role(&actor, RoleId::new(role_id), payload.into())
        .await?;

    Ok(Json(
        ApiEnvelope::data(RoleResponse::from(&role)).with_message("Role updated successfully"),
    ))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(role_id): Path<i64>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    state
        .directory_service
        .delete_role(&actor, RoleId::new(role_id))
        .await?;

    Ok(Json(ApiEnvelope::message("Role deleted successfully")))
}
