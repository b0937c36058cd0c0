use chrono::{DateTime, Utc};
use rolegate_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{Permission, PermissionId, RoleId};

/// A named bundle of permissions that can be assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    guard_name: NonEmptyString,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl Role {
    /// Creates a validated role without grants, stamped with the current time.
    pub fn new(id: RoleId, name: impl AsRef<str>, guard_name: impl AsRef<str>) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: NonEmptyString::trimmed(name)?,
            guard_name: NonEmptyString::trimmed(guard_name)?,
            created_at: now,
            updated_at: now,
            permissions: Vec::new(),
        })
    }

    /// Replaces the granted permissions, dropping duplicate identifiers.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        let mut unique: Vec<Permission> = Vec::new();
        for permission in permissions {
            if !unique.iter().any(|existing| existing.id() == permission.id()) {
                unique.push(permission);
            }
        }
        self.permissions = unique;
        self
    }

    /// Replaces the creation and update timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Returns the store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the authentication guard this role belongs to.
    #[must_use]
    pub fn guard_name(&self) -> &str {
        self.guard_name.as_str()
    }

    /// Returns when the role was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the role was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the permissions granted by this role.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        self.permissions.as_slice()
    }

    /// Returns whether the role grants the permission identifier.
    #[must_use]
    pub fn grants(&self, permission_id: PermissionId) -> bool {
        self.permissions
            .iter()
            .any(|permission| permission.id() == permission_id)
    }

    /// Returns a copy with a new name and guard, stamped as updated now.
    pub fn renamed(&self, name: impl AsRef<str>, guard_name: impl AsRef<str>) -> AppResult<Self> {
        Ok(Self {
            id: self.id,
            name: NonEmptyString::trimmed(name)?,
            guard_name: NonEmptyString::trimmed(guard_name)?,
            created_at: self.created_at,
            updated_at: Utc::now(),
            permissions: self.permissions.clone(),
        })
    }
}
