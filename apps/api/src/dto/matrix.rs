use rolegate_application::{
    AssignmentDiff, MatrixCategory, MatrixCell, MatrixRole, MatrixRow, MatrixView, RoleGrant,
};
use rolegate_domain::{PermissionId, RoleId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string of the matrix endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct MatrixQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// One (role, permission) cell in a diff payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-grant-dto.ts"
)]
pub struct RoleGrantDto {
    #[ts(type = "number")]
    pub role_id: i64,
    #[ts(type = "number")]
    pub permission_id: i64,
}

/// Incoming payload applying grant and revoke changes in one request.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-permission-diff-request.ts"
)]
pub struct RolePermissionDiffRequest {
    #[serde(default)]
    pub grants: Vec<RoleGrantDto>,
    #[serde(default)]
    pub revokes: Vec<RoleGrantDto>,
}

/// Role column header.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/matrix-role-response.ts"
)]
pub struct MatrixRoleResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
}

/// One cell of a matrix row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/matrix-cell-response.ts"
)]
pub struct MatrixCellResponse {
    #[ts(type = "number")]
    pub role_id: i64,
    pub granted: bool,
    pub pending: bool,
}

/// One permission row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/matrix-row-response.ts"
)]
pub struct MatrixRowResponse {
    #[ts(type = "number")]
    pub permission_id: i64,
    pub permission_name: String,
    pub cells: Vec<MatrixCellResponse>,
}

/// Rows sharing a category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/matrix-category-response.ts"
)]
pub struct MatrixCategoryResponse {
    pub name: String,
    pub rows: Vec<MatrixRowResponse>,
}

/// Role-permission matrix grouped by category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/matrix-view-response.ts"
)]
pub struct MatrixViewResponse {
    pub roles: Vec<MatrixRoleResponse>,
    pub categories: Vec<MatrixCategoryResponse>,
    pub pending_change_count: usize,
}

impl From<RoleGrantDto> for RoleGrant {
    fn from(value: RoleGrantDto) -> Self {
        Self::new(
            RoleId::new(value.role_id),
            PermissionId::new(value.permission_id),
        )
    }
}

impl From<RolePermissionDiffRequest> for AssignmentDiff {
    fn from(value: RolePermissionDiffRequest) -> Self {
        Self {
            grants: value.grants.into_iter().map(RoleGrant::from).collect(),
            revokes: value.revokes.into_iter().map(RoleGrant::from).collect(),
        }
    }
}

impl From<MatrixRole> for MatrixRoleResponse {
    fn from(value: MatrixRole) -> Self {
        Self {
            id: value.id.as_i64(),
            name: value.name,
        }
    }
}

impl From<MatrixCell> for MatrixCellResponse {
    fn from(value: MatrixCell) -> Self {
        Self {
            role_id: value.role_id.as_i64(),
            granted: value.granted,
            pending: value.pending,
        }
    }
}

impl From<MatrixRow> for MatrixRowResponse {
    fn from(value: MatrixRow) -> Self {
        Self {
            permission_id: value.permission_id.as_i64(),
            permission_name: value.permission_name,
            cells: value
                .cells
                .into_iter()
                .map(MatrixCellResponse::from)
                .collect(),
        }
    }
}

impl From<MatrixCategory> for MatrixCategoryResponse {
    fn from(value: MatrixCategory) -> Self {
        Self {
            name: value.name,
            rows: value.rows.into_iter().map(MatrixRowResponse::from).collect(),
        }
    }
}

impl From<MatrixView> for MatrixViewResponse {
    fn from(value: MatrixView) -> Self {
        Self {
            roles: value
                .roles
                .into_iter()
                .map(MatrixRoleResponse::from)
                .collect(),
            categories: value
                .categories
                .into_iter()
                .map(MatrixCategoryResponse::from)
                .collect(),
            pending_change_count: value.pending_change_count,
        }
    }
}
