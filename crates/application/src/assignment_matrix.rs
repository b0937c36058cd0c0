//! Bulk editing of role↔permission assignments with deferred saves.
//!
//! An editor is opened against one directory snapshot. Toggles are kept as
//! pending changes on top of that baseline until [`AssignmentMatrixEditor::save`]
//! hands the minimal diff to a [`RolePermissionUpdater`]. One editor models one
//! operator's session and is never shared between sessions.

use std::collections::{HashMap, HashSet};

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{DirectorySnapshot, Permission, PermissionId, Role, RoleId};
use tracing::{info, warn};

use crate::directory_ports::RolePermissionUpdater;

mod diff;
mod selection;
mod view;

pub use diff::{AssignmentDiff, RoleGrant};
pub use selection::RolePermissionSelection;
pub use view::{
    MatrixCategory, MatrixCell, MatrixRole, MatrixRow, MatrixView, PermissionCategoryGroup,
    filter_permissions, group_by_category,
};

/// Edit session over the role-permission matrix.
#[derive(Debug, Clone)]
pub struct AssignmentMatrixEditor {
    revision: u64,
    roles: Vec<MatrixRole>,
    permissions: Vec<Permission>,
    baseline: HashSet<RoleGrant>,
    pending: HashMap<RoleGrant, bool>,
}

impl AssignmentMatrixEditor {
    /// Opens a session against roles and permissions read at `revision`.
    #[must_use]
    pub fn new(revision: u64, roles: &[Role], permissions: &[Permission]) -> Self {
        Self {
            revision,
            roles: roles
                .iter()
                .map(|role| MatrixRole {
                    id: role.id(),
                    name: role.name().to_owned(),
                })
                .collect(),
            permissions: permissions.to_vec(),
            baseline: baseline_index(roles),
            pending: HashMap::new(),
        }
    }

    /// Opens a session against a directory snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &DirectorySnapshot) -> Self {
        Self::new(snapshot.revision, &snapshot.roles, &snapshot.permissions)
    }

    /// Returns the store revision the baseline was read at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the role columns.
    #[must_use]
    pub fn roles(&self) -> &[MatrixRole] {
        self.roles.as_slice()
    }

    /// Returns every permission row, unfiltered.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        self.permissions.as_slice()
    }

    /// Returns the effective state of a cell: a pending change wins over the
    /// saved state.
    #[must_use]
    pub fn is_granted(&self, role_id: RoleId, permission_id: PermissionId) -> bool {
        let cell = RoleGrant::new(role_id, permission_id);
        self.pending
            .get(&cell)
            .copied()
            .unwrap_or_else(|| self.baseline.contains(&cell))
    }

    /// Returns whether the cell differs from the saved state.
    #[must_use]
    pub fn is_pending(&self, role_id: RoleId, permission_id: PermissionId) -> bool {
        let cell = RoleGrant::new(role_id, permission_id);
        self.pending
            .get(&cell)
            .is_some_and(|target| *target != self.baseline.contains(&cell))
    }

    /// Flips a cell and returns its new effective state.
    ///
    /// Flipping a cell back to its saved state drops the pending entry.
    pub fn toggle(&mut self, role_id: RoleId, permission_id: PermissionId) -> AppResult<bool> {
        if !self.roles.iter().any(|role| role.id == role_id) {
            return Err(AppError::Validation(format!(
                "role '{role_id}' is not part of this matrix"
            )));
        }
        if !self
            .permissions
            .iter()
            .any(|permission| permission.id() == permission_id)
        {
            return Err(AppError::Validation(format!(
                "permission '{permission_id}' is not part of this matrix"
            )));
        }

        let cell = RoleGrant::new(role_id, permission_id);
        let target = !self.is_granted(role_id, permission_id);
        if target == self.baseline.contains(&cell) {
            self.pending.remove(&cell);
        } else {
            self.pending.insert(cell, target);
        }

        Ok(target)
    }

    /// Returns whether any cell differs from the saved state.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.pending_change_count() > 0
    }

    /// Returns the number of cells that differ from the saved state.
    #[must_use]
    pub fn pending_change_count(&self) -> usize {
        self.pending
            .iter()
            .filter(|(cell, target)| **target != self.baseline.contains(*cell))
            .count()
    }

    /// Returns the minimal grant/revoke diff against the saved state.
    #[must_use]
    pub fn diff(&self) -> AssignmentDiff {
        let mut diff = AssignmentDiff::default();
        for (cell, target) in &self.pending {
            if *target == self.baseline.contains(cell) {
                continue;
            }
            if *target {
                diff.grants.push(*cell);
            } else {
                diff.revokes.push(*cell);
            }
        }

        diff.sorted()
    }

    /// Persists the pending changes through the updater.
    ///
    /// On success the pending changes become the new baseline. On failure the
    /// session is left untouched so the operator can retry, and the updater's
    /// error is returned. An empty diff never reaches the updater.
    pub async fn save(&mut self, updater: &dyn RolePermissionUpdater) -> AppResult<AssignmentDiff> {
        let diff = self.diff();
        if diff.is_empty() {
            self.pending.clear();
            return Ok(diff);
        }

        if let Err(error) = updater.apply_role_permission_diff(&diff).await {
            warn!(
                revision = self.revision,
                changes = diff.len(),
                %error,
                "failed to save role permission changes"
            );
            return Err(error);
        }

        for grant in &diff.grants {
            self.baseline.insert(*grant);
        }
        for revoke in &diff.revokes {
            self.baseline.remove(revoke);
        }
        self.pending.clear();

        info!(
            revision = self.revision,
            grants = diff.grants.len(),
            revokes = diff.revokes.len(),
            "saved role permission changes"
        );

        Ok(diff)
    }

    /// Discards every pending change.
    pub fn cancel(&mut self) {
        self.pending.clear();
    }

    /// Returns whether a snapshot revision differs from the baseline's.
    #[must_use]
    pub fn is_stale(&self, revision: u64) -> bool {
        self.revision != revision
    }

    /// Replaces the baseline with a newer snapshot, discarding pending changes.
    ///
    /// Pending changes are keyed against the old baseline and are not carried
    /// over. Returns the number of material changes that were dropped.
    pub fn rebase(&mut self, snapshot: &DirectorySnapshot) -> usize {
        let dropped = self.pending_change_count();
        if dropped > 0 {
            warn!(
                from_revision = self.revision,
                to_revision = snapshot.revision,
                dropped,
                "discarding unsaved role permission changes after directory refresh"
            );
        }

        *self = Self::from_snapshot(snapshot);
        dropped
    }

    /// Returns the permissions matching a case-insensitive search term.
    ///
    /// Filtering never touches pending changes.
    #[must_use]
    pub fn filter(&self, search_term: &str) -> Vec<&Permission> {
        filter_permissions(&self.permissions, search_term)
    }

    /// Builds the renderable matrix for a search term.
    #[must_use]
    pub fn view(&self, search_term: &str) -> MatrixView {
        let categories = group_by_category(self.filter(search_term))
            .into_iter()
            .map(|group| MatrixCategory {
                name: group.category.to_owned(),
                rows: group
                    .permissions
                    .into_iter()
                    .map(|permission| self.row(permission))
                    .collect(),
            })
            .collect();

        MatrixView {
            roles: self.roles.clone(),
            categories,
            pending_change_count: self.pending_change_count(),
        }
    }

    fn row(&self, permission: &Permission) -> MatrixRow {
        MatrixRow {
            permission_id: permission.id(),
            permission_name: permission.name().to_owned(),
            cells: self
                .roles
                .iter()
                .map(|role| MatrixCell {
                    role_id: role.id,
                    granted: self.is_granted(role.id, permission.id()),
                    pending: self.is_pending(role.id, permission.id()),
                })
                .collect(),
        }
    }
}

fn baseline_index(roles: &[Role]) -> HashSet<RoleGrant> {
    roles
        .iter()
        .flat_map(|role| {
            role.permissions()
                .iter()
                .map(move |permission| RoleGrant::new(role.id(), permission.id()))
        })
        .collect()
}
