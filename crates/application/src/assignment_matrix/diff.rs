use rolegate_domain::{PermissionId, RoleId};
use serde::{Deserialize, Serialize};

/// One (role, permission) cell of the assignment matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleGrant {
    /// Role side of the cell.
    pub role_id: RoleId,
    /// Permission side of the cell.
    pub permission_id: PermissionId,
}

impl RoleGrant {
    /// Creates a cell key.
    #[must_use]
    pub fn new(role_id: RoleId, permission_id: PermissionId) -> Self {
        Self {
            role_id,
            permission_id,
        }
    }
}

/// Minimal set of grant changes to persist, sorted by role then permission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDiff {
    /// Cells that must become granted.
    #[serde(default)]
    pub grants: Vec<RoleGrant>,
    /// Cells that must stop being granted.
    #[serde(default)]
    pub revokes: Vec<RoleGrant>,
}

impl AssignmentDiff {
    /// Returns whether nothing has to be persisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty() && self.revokes.is_empty()
    }

    /// Returns the number of changed cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grants.len() + self.revokes.len()
    }

    /// Returns whether a cell appears on both sides, which no editor produces.
    #[must_use]
    pub fn is_contradictory(&self) -> bool {
        self.grants.iter().any(|grant| self.revokes.contains(grant))
    }

    pub(super) fn sorted(mut self) -> Self {
        self.grants.sort_unstable();
        self.grants.dedup();
        self.revokes.sort_unstable();
        self.revokes.dedup();
        self
    }
}
