use std::collections::BTreeSet;

use rolegate_core::AppResult;
use rolegate_domain::{PermissionId, Role, RoleId};

use crate::directory_ports::RolePermissionUpdater;

use super::{AssignmentDiff, RoleGrant};

/// Permission checklist for a single role.
///
/// Produces the same diff shape as the matrix so both editors share one
/// persistence path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionSelection {
    role_id: RoleId,
    saved: BTreeSet<PermissionId>,
    selected: BTreeSet<PermissionId>,
}

impl RolePermissionSelection {
    /// Starts from the role's current grants.
    #[must_use]
    pub fn new(role: &Role) -> Self {
        let saved: BTreeSet<PermissionId> = role
            .permissions()
            .iter()
            .map(|permission| permission.id())
            .collect();

        Self {
            role_id: role.id(),
            selected: saved.clone(),
            saved,
        }
    }

    /// Returns the edited role.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Returns whether the permission is currently checked.
    #[must_use]
    pub fn is_selected(&self, permission_id: PermissionId) -> bool {
        self.selected.contains(&permission_id)
    }

    /// Flips a permission and returns whether it is now checked.
    pub fn toggle(&mut self, permission_id: PermissionId) -> bool {
        if self.selected.remove(&permission_id) {
            false
        } else {
            self.selected.insert(permission_id);
            true
        }
    }

    /// Returns the checked permissions in identifier order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<PermissionId> {
        self.selected.iter().copied().collect()
    }

    /// Returns whether the checklist differs from the saved grants.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.saved != self.selected
    }

    /// Returns the grants to add and revoke for this role.
    #[must_use]
    pub fn diff(&self) -> AssignmentDiff {
        AssignmentDiff {
            grants: self
                .selected
                .difference(&self.saved)
                .map(|permission_id| RoleGrant::new(self.role_id, *permission_id))
                .collect(),
            revokes: self
                .saved
                .difference(&self.selected)
                .map(|permission_id| RoleGrant::new(self.role_id, *permission_id))
                .collect(),
        }
    }

    /// Persists the checklist; the selection is kept on failure.
    pub async fn save(&mut self, updater: &dyn RolePermissionUpdater) -> AppResult<AssignmentDiff> {
        let diff = self.diff();
        if !diff.is_empty() {
            updater.apply_role_permission_diff(&diff).await?;
        }

        self.saved = self.selected.clone();
        Ok(diff)
    }

    /// Restores the saved grants.
    pub fn reset(&mut self) {
        self.selected = self.saved.clone();
    }
}
