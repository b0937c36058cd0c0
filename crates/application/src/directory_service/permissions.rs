use rolegate_domain::{
    PERMISSION_RESOURCE_TYPES, Permission, PermissionId, PermissionTemplate, User,
    permission_templates,
};
use serde::Serialize;
use tracing::info;

use crate::directory_ports::CreatePermissionInput;

use super::*;

/// Suggested verbs and resource nouns for composing permission names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionTemplateCatalog {
    /// Built-in verbs.
    pub templates: &'static [PermissionTemplate],
    /// Known resource nouns.
    pub resource_types: &'static [&'static str],
}

impl DirectoryService {
    /// Lists permissions.
    pub async fn list_permissions(&self, actor: &User) -> AppResult<Vec<Permission>> {
        AccessGate::require(actor, &["view permissions"])?;
        self.reader.list_permissions().await
    }

    /// Creates a permission.
    pub async fn create_permission(
        &self,
        actor: &User,
        request: PermissionRequest,
    ) -> AppResult<Permission> {
        AccessGate::require(actor, &["create permissions"])?;

        let permission = self
            .writer
            .create_permission(permission_input(request)?)
            .await?;

        info!(
            actor_id = %actor.id(),
            permission_id = %permission.id(),
            name = permission.name(),
            "created permission"
        );
        Ok(permission)
    }

    /// Renames a permission. Roles and users holding it see the new name.
    pub async fn update_permission(
        &self,
        actor: &User,
        permission_id: PermissionId,
        request: PermissionRequest,
    ) -> AppResult<Permission> {
        AccessGate::require(actor, &["update permissions"])?;

        let permission = self
            .writer
            .update_permission(permission_id, permission_input(request)?)
            .await?;

        info!(actor_id = %actor.id(), %permission_id, "updated permission");
        Ok(permission)
    }

    /// Deletes a permission and every grant of it.
    pub async fn delete_permission(
        &self,
        actor: &User,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        AccessGate::require(actor, &["delete permissions"])?;
        self.writer.delete_permission(permission_id).await?;

        info!(actor_id = %actor.id(), %permission_id, "deleted permission");
        Ok(())
    }

    /// Returns the permission templates offered when creating permissions.
    pub fn permission_templates(&self, actor: &User) -> AppResult<PermissionTemplateCatalog> {
        AccessGate::require(actor, &["create permissions"])?;

        Ok(PermissionTemplateCatalog {
            templates: permission_templates(),
            resource_types: PERMISSION_RESOURCE_TYPES,
        })
    }
}

fn permission_input(request: PermissionRequest) -> AppResult<CreatePermissionInput> {
    Ok(CreatePermissionInput {
        name: required_name(&request.name, "name")?,
        guard_name: guard_name(request.guard_name.as_deref())?,
    })
}
