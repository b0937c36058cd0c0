use rolegate_domain::{Permission, PermissionTemplate, Role, User};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// API representation of a permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub guard_name: String,
    /// First token of the name, e.g. `view`.
    pub category: String,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation of a role with its grants.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub guard_name: String,
    pub created_at: String,
    pub updated_at: String,
    pub permissions: Vec<PermissionResponse>,
}

/// API representation of a directory user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub roles: Vec<RoleResponse>,
    /// Directly granted permissions, independent of roles.
    pub permissions: Vec<PermissionResponse>,
}

/// Incoming payload for password sign-in.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    #[ts(type = "Array<number>")]
    pub roles: Vec<i64>,
}

/// Incoming payload for user updates. Omitted collections stay unchanged and
/// an omitted or empty password keeps the current one.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    #[ts(type = "Array<number> | null")]
    pub roles: Option<Vec<i64>>,
    #[serde(default)]
    #[ts(type = "Array<number> | null")]
    pub permissions: Option<Vec<i64>>,
}

/// Incoming payload for role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub guard_name: Option<String>,
    #[serde(default)]
    #[ts(type = "Array<number>")]
    pub permissions: Vec<i64>,
}

/// Incoming payload for renaming a role or saving a permission.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/named-entry-request.ts"
)]
pub struct NamedEntryRequest {
    pub name: String,
    #[serde(default)]
    pub guard_name: Option<String>,
}

/// One suggested permission verb.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-template-response.ts"
)]
pub struct PermissionTemplateResponse {
    pub category: String,
    pub description: String,
}

/// Verb templates and resource nouns offered when creating permissions.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-templates-response.ts"
)]
pub struct PermissionTemplatesResponse {
    pub templates: Vec<PermissionTemplateResponse>,
    pub resource_types: Vec<String>,
}

impl From<&Permission> for PermissionResponse {
    fn from(value: &Permission) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().to_owned(),
            guard_name: value.guard_name().to_owned(),
            category: value.category().to_owned(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

impl From<&Role> for RoleResponse {
    fn from(value: &Role) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().to_owned(),
            guard_name: value.guard_name().to_owned(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
            permissions: value
                .permissions()
                .iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(value: &User) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().to_owned(),
            email: value.email().as_str().to_owned(),
            email_verified_at: value
                .email_verified_at()
                .map(|verified_at| verified_at.to_rfc3339()),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
            roles: value.roles().iter().map(RoleResponse::from).collect(),
            permissions: value
                .permissions()
                .iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

impl From<&PermissionTemplate> for PermissionTemplateResponse {
    fn from(value: &PermissionTemplate) -> Self {
        Self {
            category: value.category.to_owned(),
            description: value.description.to_owned(),
        }
    }
}
