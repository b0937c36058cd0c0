use axum::Json;
use axum::extract::{Extension, State};
use rolegate_domain::User;

use crate::dto::{ApiEnvelope, DashboardStatsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn dashboard_stats_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
) -> ApiResult<Json<ApiEnvelope<DashboardStatsResponse>>> {
    let stats = state.dashboard_service.stats(&actor).await?;

    Ok(Json(ApiEnvelope::data(DashboardStatsResponse::from(stats))))
}
