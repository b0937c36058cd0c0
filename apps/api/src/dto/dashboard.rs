use rolegate_application::{DashboardStats, RoleUserCount};
use serde::Serialize;
use ts_rs::TS;

/// Users holding one role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-user-count-response.ts"
)]
pub struct RoleUserCountResponse {
    #[ts(type = "number")]
    pub role_id: i64,
    pub role_name: String,
    pub user_count: usize,
}

/// Directory totals for the dashboard.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/dashboard-stats-response.ts"
)]
pub struct DashboardStatsResponse {
    pub total_users: usize,
    pub total_roles: usize,
    pub total_permissions: usize,
    pub role_distribution: Vec<RoleUserCountResponse>,
}

impl From<RoleUserCount> for RoleUserCountResponse {
    fn from(value: RoleUserCount) -> Self {
        Self {
            role_id: value.role_id.as_i64(),
            role_name: value.role_name,
            user_count: value.user_count,
        }
    }
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(value: DashboardStats) -> Self {
        Self {
            total_users: value.total_users,
            total_roles: value.total_roles,
            total_permissions: value.total_permissions,
            role_distribution: value
                .role_distribution
                .into_iter()
                .map(RoleUserCountResponse::from)
                .collect(),
        }
    }
}
