use rolegate_core::NonEmptyString;
use rolegate_domain::{EmailAddress, PermissionId, RoleId, UserId};

/// Validated payload for creating a directory user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Display name.
    pub name: NonEmptyString,
    /// Sign-in email, unique across the directory.
    pub email: EmailAddress,
    /// Argon2 hash of the initial password, if one was set.
    pub password_hash: Option<String>,
    /// Roles assigned on creation.
    pub role_ids: Vec<RoleId>,
}

/// Validated payload for updating a directory user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// Display name.
    pub name: NonEmptyString,
    /// Sign-in email, unique across the directory.
    pub email: EmailAddress,
    /// Replacement password hash; `None` keeps the current one.
    pub password_hash: Option<String>,
    /// Replacement role memberships; `None` keeps the current ones.
    pub role_ids: Option<Vec<RoleId>>,
    /// Replacement direct grants; `None` keeps the current ones.
    pub permission_ids: Option<Vec<PermissionId>>,
}

/// Validated payload for creating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Role name, unique per guard.
    pub name: NonEmptyString,
    /// Authentication guard.
    pub guard_name: NonEmptyString,
    /// Grants attached on creation.
    pub permission_ids: Vec<PermissionId>,
}

/// Validated payload for renaming a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRoleInput {
    /// Role name, unique per guard.
    pub name: NonEmptyString,
    /// Authentication guard.
    pub guard_name: NonEmptyString,
}

/// Validated payload for creating a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Capability token, unique per guard.
    pub name: NonEmptyString,
    /// Authentication guard.
    pub guard_name: NonEmptyString,
}

/// Validated payload for renaming a permission.
pub type UpdatePermissionInput = CreatePermissionInput;

/// Credentials looked up during sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Owner of the credentials.
    pub user_id: UserId,
    /// Stored password hash.
    pub password_hash: String,
}
