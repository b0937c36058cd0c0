use std::collections::{BTreeMap, BTreeSet};

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{
    DirectorySnapshot, EmailAddress, Permission, PermissionId, Role, RoleId, User, UserId,
};

#[derive(Debug, Clone)]
pub(super) struct StoredUser {
    pub(super) user: User,
    pub(super) password_hash: Option<String>,
    pub(super) role_ids: BTreeSet<RoleId>,
    pub(super) permission_ids: BTreeSet<PermissionId>,
}

#[derive(Debug, Clone)]
pub(super) struct StoredRole {
    pub(super) role: Role,
    pub(super) permission_ids: BTreeSet<PermissionId>,
}

/// Normalized directory tables. Memberships and grants are stored as id sets
/// and embedded only when read, so renames show up everywhere at once.
#[derive(Debug, Default)]
pub(super) struct DirectoryState {
    pub(super) revision: u64,
    last_user_id: i64,
    last_role_id: i64,
    last_permission_id: i64,
    pub(super) users: BTreeMap<UserId, StoredUser>,
    pub(super) roles: BTreeMap<RoleId, StoredRole>,
    pub(super) permissions: BTreeMap<PermissionId, Permission>,
}

impl DirectoryState {
    pub(super) fn touch(&mut self) {
        self.revision = self.revision.saturating_add(1);
    }

    pub(super) fn next_user_id(&mut self) -> UserId {
        self.last_user_id += 1;
        UserId::new(self.last_user_id)
    }

    pub(super) fn next_role_id(&mut self) -> RoleId {
        self.last_role_id += 1;
        RoleId::new(self.last_role_id)
    }

    pub(super) fn next_permission_id(&mut self) -> PermissionId {
        self.last_permission_id += 1;
        PermissionId::new(self.last_permission_id)
    }

    pub(super) fn permissions_for<'a>(
        &'a self,
        permission_ids: impl IntoIterator<Item = &'a PermissionId>,
    ) -> Vec<Permission> {
        permission_ids
            .into_iter()
            .filter_map(|permission_id| self.permissions.get(permission_id).cloned())
            .collect()
    }

    pub(super) fn materialize_role(&self, stored: &StoredRole) -> Role {
        stored
            .role
            .clone()
            .with_permissions(self.permissions_for(&stored.permission_ids))
    }

    pub(super) fn materialize_user(&self, stored: &StoredUser) -> User {
        let roles = stored
            .role_ids
            .iter()
            .filter_map(|role_id| self.roles.get(role_id))
            .map(|role| self.materialize_role(role));

        stored
            .user
            .clone()
            .with_roles(roles)
            .with_permissions(self.permissions_for(&stored.permission_ids))
    }

    pub(super) fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            revision: self.revision,
            users: self
                .users
                .values()
                .map(|user| self.materialize_user(user))
                .collect(),
            roles: self
                .roles
                .values()
                .map(|role| self.materialize_role(role))
                .collect(),
            permissions: self.permissions.values().cloned().collect(),
        }
    }

    pub(super) fn ensure_roles_exist(&self, role_ids: &[RoleId]) -> AppResult<()> {
        match role_ids
            .iter()
            .find(|role_id| !self.roles.contains_key(*role_id))
        {
            Some(role_id) => Err(AppError::Validation(format!(
                "role '{role_id}' does not exist"
            ))),
            None => Ok(()),
        }
    }

    pub(super) fn ensure_permissions_exist(
        &self,
        permission_ids: &[PermissionId],
    ) -> AppResult<()> {
        match permission_ids
            .iter()
            .find(|permission_id| !self.permissions.contains_key(*permission_id))
        {
            Some(permission_id) => Err(AppError::Validation(format!(
                "permission '{permission_id}' does not exist"
            ))),
            None => Ok(()),
        }
    }

    pub(super) fn ensure_unique_email(
        &self,
        email: &EmailAddress,
        except: Option<UserId>,
    ) -> AppResult<()> {
        let taken = self
            .users
            .iter()
            .any(|(user_id, stored)| Some(*user_id) != except && stored.user.email() == email);
        if taken {
            return Err(AppError::Conflict(format!(
                "email '{}' is already in use",
                email.as_str()
            )));
        }

        Ok(())
    }

    pub(super) fn ensure_unique_role(
        &self,
        name: &str,
        guard_name: &str,
        except: Option<RoleId>,
    ) -> AppResult<()> {
        let taken = self.roles.iter().any(|(role_id, stored)| {
            Some(*role_id) != except
                && stored.role.name() == name
                && stored.role.guard_name() == guard_name
        });
        if taken {
            return Err(AppError::Conflict(format!(
                "role '{name}' already exists for guard '{guard_name}'"
            )));
        }

        Ok(())
    }

    pub(super) fn ensure_unique_permission(
        &self,
        name: &str,
        guard_name: &str,
        except: Option<PermissionId>,
    ) -> AppResult<()> {
        let taken = self.permissions.iter().any(|(permission_id, permission)| {
            Some(*permission_id) != except
                && permission.name() == name
                && permission.guard_name() == guard_name
        });
        if taken {
            return Err(AppError::Conflict(format!(
                "permission '{name}' already exists for guard '{guard_name}'"
            )));
        }

        Ok(())
    }
}
