//! Permission-checked administration of users, roles and permissions.

use std::sync::Arc;

use rolegate_core::{AppError, AppResult, NonEmptyString, SessionIdentity};
use rolegate_domain::{DEFAULT_GUARD_NAME, PermissionId, RoleId, User, UserId};

use crate::AccessGate;
use crate::directory_ports::{DirectoryReader, DirectoryWriter, RolePermissionUpdater};
use crate::session_service::PasswordHasher;

mod permissions;
mod roles;
mod users;

pub use permissions::PermissionTemplateCatalog;

/// Unvalidated payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Initial plaintext password.
    pub password: String,
    /// Roles assigned on creation.
    pub role_ids: Vec<RoleId>,
}

/// Unvalidated payload for updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdateRequest {
    /// Display name.
    pub name: String,
    /// Sign-in email.
    pub email: String,
    /// Replacement plaintext password; blank or `None` keeps the current one.
    pub password: Option<String>,
    /// Replacement role memberships.
    pub role_ids: Option<Vec<RoleId>>,
    /// Replacement direct grants.
    pub permission_ids: Option<Vec<PermissionId>>,
}

/// Unvalidated payload for creating or renaming a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRequest {
    /// Role name.
    pub name: String,
    /// Authentication guard; defaults to `web`.
    pub guard_name: Option<String>,
    /// Grants attached on creation. Ignored on rename.
    pub permission_ids: Vec<PermissionId>,
}

/// Unvalidated payload for creating or renaming a permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    /// Capability token, e.g. `view users`.
    pub name: String,
    /// Authentication guard; defaults to `web`.
    pub guard_name: Option<String>,
}

/// Application service for directory administration.
#[derive(Clone)]
pub struct DirectoryService {
    reader: Arc<dyn DirectoryReader>,
    writer: Arc<dyn DirectoryWriter>,
    role_permission_updater: Arc<dyn RolePermissionUpdater>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl DirectoryService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        reader: Arc<dyn DirectoryReader>,
        writer: Arc<dyn DirectoryWriter>,
        role_permission_updater: Arc<dyn RolePermissionUpdater>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            reader,
            writer,
            role_permission_updater,
            password_hasher,
        }
    }

    /// Loads the directory user behind a session.
    ///
    /// Grants are re-read on every call so revoked permissions apply
    /// immediately.
    pub async fn resolve_actor(&self, identity: &SessionIdentity) -> AppResult<User> {
        self.reader
            .find_user(UserId::new(identity.user_id()))
            .await?
            .ok_or_else(|| AppError::Unauthorized("session user no longer exists".to_owned()))
    }
}

fn guard_name(value: Option<&str>) -> AppResult<NonEmptyString> {
    match value {
        Some(value) => NonEmptyString::trimmed(value)
            .map_err(|_| AppError::Validation("guard name is required".to_owned())),
        None => NonEmptyString::new(DEFAULT_GUARD_NAME),
    }
}

fn required_name(value: &str, field: &str) -> AppResult<NonEmptyString> {
    NonEmptyString::trimmed(value)
        .map_err(|_| AppError::Validation(format!("{field} is required")))
}

#[cfg(test)]
mod tests;
