use rolegate_domain::{Permission, PermissionId, RoleId};
use serde::Serialize;

/// Column header of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRole {
    /// Role identifier.
    pub id: RoleId,
    /// Role name.
    pub name: String,
}

/// State of one checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatrixCell {
    /// Role column of the cell.
    pub role_id: RoleId,
    /// Effective state, pending changes included.
    pub granted: bool,
    /// Whether the cell differs from the saved state.
    pub pending: bool,
}

/// One permission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    /// Permission identifier.
    pub permission_id: PermissionId,
    /// Permission name.
    pub permission_name: String,
    /// One cell per role, in column order.
    pub cells: Vec<MatrixCell>,
}

/// Rows sharing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixCategory {
    /// Category derived from the permission names.
    pub name: String,
    /// Rows in input order.
    pub rows: Vec<MatrixRow>,
}

/// Renderable matrix after filtering and grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixView {
    /// Role columns.
    pub roles: Vec<MatrixRole>,
    /// Category sections in first-seen order.
    pub categories: Vec<MatrixCategory>,
    /// Number of material pending changes, including filtered-out cells.
    pub pending_change_count: usize,
}

/// Permissions sharing a display category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCategoryGroup<'a> {
    /// Category name.
    pub category: &'a str,
    /// Permissions in input order.
    pub permissions: Vec<&'a Permission>,
}

/// Keeps the permissions whose name contains the term, ignoring case.
///
/// An empty term keeps everything.
#[must_use]
pub fn filter_permissions<'a>(
    permissions: &'a [Permission],
    search_term: &str,
) -> Vec<&'a Permission> {
    let needle = search_term.to_lowercase();
    permissions
        .iter()
        .filter(|permission| permission.name().to_lowercase().contains(needle.as_str()))
        .collect()
}

/// Groups permissions by category, keeping first-seen category order.
#[must_use]
pub fn group_by_category<'a>(
    permissions: impl IntoIterator<Item = &'a Permission>,
) -> Vec<PermissionCategoryGroup<'a>> {
    let mut groups: Vec<PermissionCategoryGroup<'a>> = Vec::new();
    for permission in permissions {
        let category = permission.category();
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.permissions.push(permission),
            None => groups.push(PermissionCategoryGroup {
                category,
                permissions: vec![permission],
            }),
        }
    }

    groups
}
