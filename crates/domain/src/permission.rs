use chrono::{DateTime, Utc};
use rolegate_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::PermissionId;

/// Guard assigned to permissions and roles when the caller does not name one.
pub const DEFAULT_GUARD_NAME: &str = "web";

/// Resource nouns offered by the permission templates.
pub const PERMISSION_RESOURCE_TYPES: &[&str] = &[
    "users",
    "roles",
    "permissions",
    "dashboard",
    "settings",
    "reports",
    "logs",
    "system",
];

/// A capability token stored in the directory.
///
/// The name doubles as the label shown to operators and the token checked by
/// access decisions, e.g. `"view users"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: PermissionId,
    name: NonEmptyString,
    guard_name: NonEmptyString,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Permission {
    /// Creates a validated permission stamped with the current time.
    pub fn new(
        id: PermissionId,
        name: impl AsRef<str>,
        guard_name: impl AsRef<str>,
    ) -> AppResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id,
            name: NonEmptyString::trimmed(name)?,
            guard_name: NonEmptyString::trimmed(guard_name)?,
            created_at: now,
            updated_at: now,
        })
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
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the capability token.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the authentication guard this permission belongs to.
    #[must_use]
    pub fn guard_name(&self) -> &str {
        self.guard_name.as_str()
    }

    /// Returns the display category derived from the name.
    #[must_use]
    pub fn category(&self) -> &str {
        permission_category(self.name.as_str())
    }

    /// Returns when the permission was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the permission was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy with a new name and guard, stamped as updated now.
    pub fn renamed(&self, name: impl AsRef<str>, guard_name: impl AsRef<str>) -> AppResult<Self> {
        Ok(Self {
            id: self.id,
            name: NonEmptyString::trimmed(name)?,
            guard_name: NonEmptyString::trimmed(guard_name)?,
            created_at: self.created_at,
            updated_at: Utc::now(),
        })
    }
}

/// Returns the first whitespace-delimited token of a permission name.
///
/// `"view users"` belongs to `"view"`; a single-word name is its own category.
#[must_use]
pub fn permission_category(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}

/// A suggested permission verb offered when creating permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionTemplate {
    /// Verb used as the permission category.
    pub category: &'static str,
    /// Operator-facing explanation of the verb.
    pub description: &'static str,
}

impl PermissionTemplate {
    /// Builds the permission name for a resource, e.g. `"view users"`.
    #[must_use]
    pub fn name_for(&self, resource: &str) -> String {
        format!("{} {}", self.category, resource.trim())
    }
}

/// Returns the built-in permission verb templates.
#[must_use]
pub fn permission_templates() -> &'static [PermissionTemplate] {
    const TEMPLATES: &[PermissionTemplate] = &[
        PermissionTemplate {
            category: "view",
            description: "View/Read access",
        },
        PermissionTemplate {
            category: "create",
            description: "Create/Add new items",
        },
        PermissionTemplate {
            category: "update",
            description: "Edit/Modify existing items",
        },
        PermissionTemplate {
            category: "delete",
            description: "Remove/Delete items",
        },
        PermissionTemplate {
            category: "manage",
            description: "Full management access",
        },
    ];

    TEMPLATES
}

#[cfg(test)]
mod tests {
    use super::{Permission, permission_category, permission_templates};
    use crate::PermissionId;

    #[test]
    fn category_is_first_token() {
        assert_eq!(permission_category("view users"), "view");
        assert_eq!(permission_category("delete  audit logs"), "delete");
    }

    #[test]
    fn single_word_name_is_its_own_category() {
        assert_eq!(permission_category("users.view"), "users.view");
    }

    #[test]
    fn permission_names_are_trimmed() {
        let permission = Permission::new(PermissionId::new(1), "  view roles ", "web");
        assert_eq!(
            permission.map(|value| value.name().to_owned()).unwrap_or_default(),
            "view roles"
        );
    }

    #[test]
    fn blank_permission_name_is_rejected() {
        assert!(Permission::new(PermissionId::new(1), "   ", "web").is_err());
        assert!(Permission::new(PermissionId::new(1), "view users", " ").is_err());
    }

    #[test]
    fn templates_compose_names() {
        let names: Vec<String> = permission_templates()
            .iter()
            .map(|template| template.name_for("users"))
            .collect();
        assert_eq!(
            names,
            vec![
                "view users",
                "create users",
                "update users",
                "delete users",
                "manage users"
            ]
        );
    }
}
