use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use rolegate_domain::{User, UserId};

use crate::dto::{ApiEnvelope, CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<ApiEnvelope<Vec<UserResponse>>>> {
    let users = state
        .directory_service
        .list_users(&actor)
        .await?
        .iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(ApiEnvelope::data(users)))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<ApiEnvelope<UserResponse>>> {
    let user = state
        .directory_service
        .get_user(&actor, UserId::new(user_id))
        .await?;

    Ok(Json(ApiEnvelope::data(UserResponse::from(&user))))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiEnvelope<UserResponse>>)> {
    let user = state
        .directory_service
        .create_user(&actor, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(
            ApiEnvelope::data(UserResponse::from(&user)).with_message("User created successfully"),
        ),
    ))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<ApiEnvelope<UserResponse>>> {
    let user = state
        .directory_service
        .update_user(&actor, UserId::new(user_id), payload.into())
        .await?;

    Ok(Json(
        ApiEnvelope::data(UserResponse::from(&user)).with_message("User updated successfully"),
    ))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    state
        .directory_service
        .delete_user(&actor, UserId::new(user_id))
        .await?;

    Ok(Json(ApiEnvelope::message("User deleted successfully")))
}
