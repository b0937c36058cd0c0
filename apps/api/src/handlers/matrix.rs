use axum::Json;
use axum::extract::{Extension, Query, State};
use rolegate_application::AssignmentDiff;
use rolegate_domain::User;

use crate::dto::{ApiEnvelope, MatrixQuery, MatrixViewResponse, RolePermissionDiffRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn role_permission_matrix_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Query(query): Query<MatrixQuery>,
) -> ApiResult<Json<ApiEnvelope<MatrixViewResponse>>> {
    let view = state
        .directory_service
        .matrix_view(&actor, query.search.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(ApiEnvelope::data(MatrixViewResponse::from(view))))
}

pub async fn update_role_permissions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<RolePermissionDiffRequest>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    state
        .directory_service
        .apply_role_permission_diff(&actor, AssignmentDiff::from(payload))
        .await?;

    Ok(Json(ApiEnvelope::message("Role permissions updated")))
}
