use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use rolegate_domain::{PermissionId, User};

use crate::dto::{
    ApiEnvelope, NamedEntryRequest, PermissionResponse, PermissionTemplatesResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<ApiEnvelope<Vec<PermissionResponse>>>> {
    let permissions = state
        .directory_service
        .list_permissions(&actor)
        .await?
        .iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(ApiEnvelope::data(permissions)))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<NamedEntryRequest>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<PermissionResponse>>)> {
    let permission = state
        .directory_service
        .create_permission(&actor, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiEnvelope::data(PermissionResponse::from(&permission))
                .with_message("Permission created successfully"),
        ),
    ))
}

pub async fn update_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(permission_id): Path<i64>,
    Json(payload): Json<NamedEntryRequest>,
) -> ApiResult<Json<ApiEnvelope<PermissionResponse>>> {
    let permission = state
        .directory_service
        .update_permission(&actor, PermissionId::new(permission_id), payload.into())
        .await?;

    Ok(Json(
        ApiEnvelope::data(PermissionResponse::from(&permission))
            .with_message("Permission updated successfully"),
    ))
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(permission_id): Path<i64>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    state
        .directory_service
        .delete_permission(&actor, PermissionId::new(permission_id))
        .await?;

    Ok(Json(ApiEnvelope::message("Permission deleted successfully")))
}

pub async fn permission_templates_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<ApiEnvelope<PermissionTemplatesResponse>>> {
    let catalog = state.directory_service.permission_templates(&actor)?;

    Ok(Json(ApiEnvelope::data(PermissionTemplatesResponse::from(
        catalog,
    ))))
}
