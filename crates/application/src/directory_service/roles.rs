use rolegate_domain::{Role, RoleId, User};
use tracing::info;

use crate::assignment_matrix::{AssignmentDiff, AssignmentMatrixEditor, MatrixView};
use crate::directory_ports::{CreateRoleInput, UpdateRoleInput};

use super::*;

impl DirectoryService {
    /// Lists roles with their grants.
    pub async fn list_roles(&self, actor: &User) -> AppResult<Vec<Role>> {
        AccessGate::require(actor, &["view roles"])?;
        self.reader.list_roles().await
    }

    /// Creates a role with an initial set of grants.
    pub async fn create_role(&self, actor: &User, request: RoleRequest) -> AppResult<Role> {
        AccessGate::require(actor, &["create roles"])?;

        let role = self
            .writer
            .create_role(CreateRoleInput {
                name: required_name(&request.name, "name")?,
                guard_name: guard_name(request.guard_name.as_deref())?,
                permission_ids: request.permission_ids,
            })
            .await?;

        info!(actor_id = %actor.id(), role_id = %role.id(), "created role");
        Ok(role)
    }

    /// Renames a role. Grants are changed through
    /// [`DirectoryService::apply_role_permission_diff`].
    pub async fn update_role(
        &self,
        actor: &User,
        role_id: RoleId,
        request: RoleRequest,
    ) -> AppResult<Role> {
        AccessGate::require(actor, &["update roles"])?;

        let role = self
            .writer
            .update_role(
                role_id,
                UpdateRoleInput {
                    name: required_name(&request.name, "name")?,
                    guard_name: guard_name(request.guard_name.as_deref())?,
                },
            )
            .await?;

        info!(actor_id = %actor.id(), %role_id, "updated role");
        Ok(role)
    }

    /// Deletes a role and its memberships.
    pub async fn delete_role(&self, actor: &User, role_id: RoleId) -> AppResult<()> {
        AccessGate::require(actor, &["delete roles"])?;
        self.writer.delete_role(role_id).await?;

        info!(actor_id = %actor.id(), %role_id, "deleted role");
        Ok(())
    }

    /// Builds the role-permission matrix for a search term.
    pub async fn matrix_view(&self, actor: &User, search_term: &str) -> AppResult<MatrixView> {
        AccessGate::require(actor, &["view roles", "view permissions"])?;

        let snapshot = self.reader.snapshot().await?;
        Ok(AssignmentMatrixEditor::from_snapshot(&snapshot).view(search_term))
    }

    /// Applies an incremental grant/revoke diff.
    ///
    /// An empty diff is accepted without touching the store.
    pub async fn apply_role_permission_diff(
        &self,
        actor: &User,
        diff: AssignmentDiff,
    ) -> AppResult<()> {
        AccessGate::require(actor, &["update roles"])?;

        if diff.is_contradictory() {
            return Err(AppError::Validation(
                "a role permission cannot be granted and revoked in the same change".to_owned(),
            ));
        }
        if diff.is_empty() {
            return Ok(());
        }

        self.role_permission_updater
            .apply_role_permission_diff(&diff)
            .await?;

        info!(
            actor_id = %actor.id(),
            grants = diff.grants.len(),
            revokes = diff.revokes.len(),
            "applied role permission changes"
        );
        Ok(())
    }
}
