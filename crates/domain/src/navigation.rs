use std::str::FromStr;

use rolegate_core::AppError;
use serde::{Deserialize, Serialize};

/// Views of the admin console guarded by a required permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminView {
    /// Overview with directory totals.
    Dashboard,
    /// User management.
    Users,
    /// Role management.
    Roles,
    /// Permission management and the role-permission matrix.
    Permissions,
    /// Console settings.
    Settings,
}

impl AdminView {
    /// Returns a stable transport value for this view.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Roles => "roles",
            Self::Permissions => "permissions",
            Self::Settings => "settings",
        }
    }

    /// Returns all known views in menu order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AdminView] = &[
            AdminView::Dashboard,
            AdminView::Users,
            AdminView::Roles,
            AdminView::Permissions,
            AdminView::Settings,
        ];

        ALL
    }

    /// Returns the menu label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Roles => "Roles",
            Self::Permissions => "Permissions",
            Self::Settings => "Settings",
        }
    }

    /// Returns the route the view is served under.
    #[must_use]
    pub fn href(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Users => "/dashboard/users",
            Self::Roles => "/dashboard/roles",
            Self::Permissions => "/dashboard/permissions",
            Self::Settings => "/dashboard/settings",
        }
    }

    /// Returns the permission name required to open the view.
    #[must_use]
    pub fn required_permission(&self) -> &'static str {
        match self {
            Self::Dashboard => "view dashboard",
            Self::Users => "view users",
            Self::Roles => "view roles",
            Self::Permissions => "view permissions",
            Self::Settings => "view settings",
        }
    }

    /// Returns the menu entry pointing at this view.
    #[must_use]
    pub fn navigation_entry(&self) -> NavigationEntry {
        NavigationEntry {
            label: self.label().to_owned(),
            href: self.href().to_owned(),
            required_permission: Some(self.required_permission().to_owned()),
        }
    }
}

impl FromStr for AdminView {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dashboard" => Ok(Self::Dashboard),
            "users" => Ok(Self::Users),
            "roles" => Ok(Self::Roles),
            "permissions" => Ok(Self::Permissions),
            "settings" => Ok(Self::Settings),
            _ => Err(AppError::NotFound(format!("unknown admin view '{value}'"))),
        }
    }
}

/// A candidate menu entry, shown only when its requirement is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Menu label.
    pub label: String,
    /// Route the entry links to.
    pub href: String,
    /// Permission name needed to see the entry; `None` means always visible.
    pub required_permission: Option<String>,
}

/// Returns the admin console menu in display order.
#[must_use]
pub fn admin_navigation() -> Vec<NavigationEntry> {
    AdminView::all()
        .iter()
        .map(AdminView::navigation_entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{AdminView, admin_navigation};

    #[test]
    fn view_roundtrip_transport_value() {
        for view in AdminView::all() {
            let parsed = AdminView::from_str(view.as_str());
            assert!(parsed.is_ok_and(|parsed| parsed == *view));
        }
    }

    #[test]
    fn unknown_view_is_not_found() {
        assert!(AdminView::from_str("audit").is_err());
    }

    #[test]
    fn navigation_entries_carry_view_requirements() {
        let entries = admin_navigation();
        assert_eq!(entries.len(), AdminView::all().len());
        assert_eq!(entries[1].href, "/dashboard/users");
        assert_eq!(entries[1].required_permission.as_deref(), Some("view users"));
    }
}
