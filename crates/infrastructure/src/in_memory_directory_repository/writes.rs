use std::collections::BTreeSet;

use async_trait::async_trait;
use rolegate_application::{
    CreatePermissionInput, CreateRoleInput, CreateUserInput, DirectoryWriter,
    UpdatePermissionInput, UpdateRoleInput, UpdateUserInput,
};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{Permission, PermissionId, Role, RoleId, User, UserId};

use super::InMemoryDirectoryRepository;
use super::state::{StoredRole, StoredUser};

#[async_trait]
impl DirectoryWriter for InMemoryDirectoryRepository {
    async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        let mut state = self.state.write().await;
        state.ensure_unique_email(&input.email, None)?;
        state.ensure_roles_exist(&input.role_ids)?;

        let user_id = state.next_user_id();
        let stored = StoredUser {
            user: User::new(user_id, input.name.as_str(), input.email.as_str())?,
            password_hash: input.password_hash,
            role_ids: input.role_ids.into_iter().collect(),
            permission_ids: BTreeSet::new(),
        };
        let user = state.materialize_user(&stored);
        state.users.insert(user_id, stored);
        state.touch();

        Ok(user)
    }

    async fn update_user(&self, user_id: UserId, input: UpdateUserInput) -> AppResult<User> {
        let mut state = self.state.write().await;
        let Some(current) = state.users.get(&user_id).cloned() else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };
        state.ensure_unique_email(&input.email, Some(user_id))?;
        if let Some(role_ids) = &input.role_ids {
            state.ensure_roles_exist(role_ids)?;
        }
        if let Some(permission_ids) = &input.permission_ids {
            state.ensure_permissions_exist(permission_ids)?;
        }

        let stored = StoredUser {
            user: current
                .user
                .renamed(input.name.as_str(), input.email.as_str())?,
            password_hash: input.password_hash.or(current.password_hash),
            role_ids: input
                .role_ids
                .map_or(current.role_ids, |role_ids| role_ids.into_iter().collect()),
            permission_ids: input.permission_ids.map_or(current.permission_ids, |ids| {
                ids.into_iter().collect()
            }),
        };
        let user = state.materialize_user(&stored);
        state.users.insert(user_id, stored);
        state.touch();

        Ok(user)
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.users.remove(&user_id).is_none() {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }
        state.touch();

        Ok(())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let mut state = self.state.write().await;
        state.ensure_unique_role(input.name.as_str(), input.guard_name.as_str(), None)?;
        state.ensure_permissions_exist(&input.permission_ids)?;

        let role_id = state.next_role_id();
        let stored = StoredRole {
            role: Role::new(role_id, input.name.as_str(), input.guard_name.as_str())?,
            permission_ids: input.permission_ids.into_iter().collect(),
        };
        let role = state.materialize_role(&stored);
        state.roles.insert(role_id, stored);
        state.touch();

        Ok(role)
    }

    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        let mut state = self.state.write().await;
        state.ensure_unique_role(
            input.name.as_str(),
            input.guard_name.as_str(),
            Some(role_id),
        )?;
        let Some(stored) = state.roles.get_mut(&role_id) else {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        };

        stored.role = stored
            .role
            .renamed(input.name.as_str(), input.guard_name.as_str())?;
        let stored = stored.clone();
        state.touch();

        Ok(state.materialize_role(&stored))
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.roles.remove(&role_id).is_none() {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        }
        for user in state.users.values_mut() {
            user.role_ids.remove(&role_id);
        }
        state.touch();

        Ok(())
    }

    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        let mut state = self.state.write().await;
        state.ensure_unique_permission(input.name.as_str(), input.guard_name.as_str(), None)?;

        let permission_id = state.next_permission_id();
        let permission =
            Permission::new(permission_id, input.name.as_str(), input.guard_name.as_str())?;
        state.permissions.insert(permission_id, permission.clone());
        state.touch();

        Ok(permission)
    }

    async fn update_permission(
        &self,
        permission_id: PermissionId,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        let mut state = self.state.write().await;
        state.ensure_unique_permission(
            input.name.as_str(),
            input.guard_name.as_str(),
            Some(permission_id),
        )?;
        let Some(current) = state.permissions.get(&permission_id) else {
            return Err(AppError::NotFound(format!(
                "permission '{permission_id}' does not exist"
            )));
        };

        let permission = current.renamed(input.name.as_str(), input.guard_name.as_str())?;
        state.permissions.insert(permission_id, permission.clone());
        state.touch();

        Ok(permission)
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.permissions.remove(&permission_id).is_none() {
            return Err(AppError::NotFound(format!(
                "permission '{permission_id}' does not exist"
            )));
        }
        for role in state.roles.values_mut() {
            role.permission_ids.remove(&permission_id);
        }
        for user in state.users.values_mut() {
            user.permission_ids.remove(&permission_id);
        }
        state.touch();

        Ok(())
    }
}
