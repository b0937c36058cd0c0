use async_trait::async_trait;

use rolegate_core::AppResult;
use rolegate_domain::{
    DirectorySnapshot, EmailAddress, Permission, PermissionId, Role, RoleId, User, UserId,
};

use crate::assignment_matrix::AssignmentDiff;

use super::inputs::{
    CreatePermissionInput, CreateRoleInput, CreateUserInput, StoredCredentials,
    UpdatePermissionInput, UpdateRoleInput, UpdateUserInput,
};

/// Read port over the directory.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    /// Reads users, roles and permissions at one store revision.
    async fn snapshot(&self) -> AppResult<DirectorySnapshot>;

    /// Lists all users with embedded roles and direct grants.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Lists all roles with embedded grants.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Lists all permissions.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Finds one user with embedded roles and direct grants.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>>;
}

/// Write port over the directory.
#[async_trait]
pub trait DirectoryWriter: Send + Sync {
    /// Creates a user.
    async fn create_user(&self, input: CreateUserInput) -> AppResult<User>;

    /// Updates a user.
    async fn update_user(&self, user_id: UserId, input: UpdateUserInput) -> AppResult<User>;

    /// Deletes a user.
    async fn delete_user(&self, user_id: UserId) -> AppResult<()>;

    /// Creates a role.
    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role>;

    /// Renames a role.
    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role>;

    /// Deletes a role and its memberships.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<()>;

    /// Creates a permission.
    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission>;

    /// Renames a permission.
    async fn update_permission(
        &self,
        permission_id: PermissionId,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission>;

    /// Deletes a permission and every grant of it.
    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<()>;
}

/// Port applying incremental role grant changes.
#[async_trait]
pub trait RolePermissionUpdater: Send + Sync {
    /// Adds the diff's grants and removes its revokes.
    ///
    /// Implementations apply the whole diff or nothing.
    async fn apply_role_permission_diff(&self, diff: &AssignmentDiff) -> AppResult<()>;
}

/// Port returning the user bound to the current session.
#[async_trait]
pub trait CurrentUserProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> AppResult<Option<User>>;
}

/// Port for sign-in credential lookups.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Finds the stored credentials for an email.
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<StoredCredentials>>;
}
