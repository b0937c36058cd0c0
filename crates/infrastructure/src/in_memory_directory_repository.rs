use std::collections::BTreeSet;

use async_trait::async_trait;
use rolegate_application::{
    AssignmentDiff, CredentialRepository, DirectoryReader, RolePermissionUpdater,
    StoredCredentials,
};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{DirectorySnapshot, EmailAddress, Permission, Role, User, UserId};
use tokio::sync::RwLock;
use tracing::debug;

mod state;
mod writes;

use state::DirectoryState;

/// In-memory directory store.
///
/// All tables sit behind one lock so a snapshot never mixes two revisions.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryRepository {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DirectoryState::default()),
        }
    }

    /// Returns the current store revision.
    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }
}

#[async_trait]
impl DirectoryReader for InMemoryDirectoryRepository {
    async fn snapshot(&self) -> AppResult<DirectorySnapshot> {
        Ok(self.state.read().await.snapshot())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .map(|user| state.materialize_user(user))
            .collect())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        let state = self.state.read().await;
        Ok(state
            .roles
            .values()
            .map(|role| state.materialize_role(role))
            .collect())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.state.read().await.permissions.values().cloned().collect())
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .get(&user_id)
            .map(|user| state.materialize_user(user)))
    }
}

#[async_trait]
impl RolePermissionUpdater for InMemoryDirectoryRepository {
    async fn apply_role_permission_diff(&self, diff: &AssignmentDiff) -> AppResult<()> {
        let mut state = self.state.write().await;

        let role_ids: BTreeSet<_> = diff
            .grants
            .iter()
            .chain(&diff.revokes)
            .map(|cell| cell.role_id)
            .collect();
        let permission_ids: BTreeSet<_> = diff
            .grants
            .iter()
            .chain(&diff.revokes)
            .map(|cell| cell.permission_id)
            .collect();
        for role_id in &role_ids {
            if !state.roles.contains_key(role_id) {
                return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
            }
        }
        for permission_id in &permission_ids {
            if !state.permissions.contains_key(permission_id) {
                return Err(AppError::NotFound(format!(
                    "permission '{permission_id}' does not exist"
                )));
            }
        }

        for grant in &diff.grants {
            if let Some(role) = state.roles.get_mut(&grant.role_id) {
                role.permission_ids.insert(grant.permission_id);
            }
        }
        for revoke in &diff.revokes {
            if let Some(role) = state.roles.get_mut(&revoke.role_id) {
                role.permission_ids.remove(&revoke.permission_id);
            }
        }
        state.touch();

        debug!(
            revision = state.revision,
            grants = diff.grants.len(),
            revokes = diff.revokes.len(),
            "applied role permission diff"
        );
        Ok(())
    }
}

#[async_trait]
impl CredentialRepository for InMemoryDirectoryRepository {
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<StoredCredentials>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find_map(|(user_id, stored)| {
            let password_hash = stored.password_hash.as_ref()?;
            (stored.user.email() == email).then(|| StoredCredentials {
                user_id: *user_id,
                password_hash: password_hash.clone(),
            })
        }))
    }
}

#[cfg(test)]
mod tests;
