use std::sync::Arc;

use rolegate_core::AppResult;
use rolegate_domain::{RoleId, User};
use serde::Serialize;

use crate::AccessGate;
use crate::directory_ports::DirectoryReader;

/// Number of users holding one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleUserCount {
    /// Role identifier.
    pub role_id: RoleId,
    /// Role name.
    pub role_name: String,
    /// Users assigned the role.
    pub user_count: usize,
}

/// Directory totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Number of users.
    pub total_users: usize,
    /// Number of roles.
    pub total_roles: usize,
    /// Number of permissions.
    pub total_permissions: usize,
    /// Users per role, in role order.
    pub role_distribution: Vec<RoleUserCount>,
}

/// Read-only directory statistics.
#[derive(Clone)]
pub struct DashboardService {
    reader: Arc<dyn DirectoryReader>,
}

impl DashboardService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(reader: Arc<dyn DirectoryReader>) -> Self {
        Self { reader }
    }

    /// Returns totals and the role distribution from one snapshot.
    pub async fn stats(&self, actor: &User) -> AppResult<DashboardStats> {
        AccessGate::require(actor, &["view dashboard"])?;

        let snapshot = self.reader.snapshot().await?;
        let role_distribution = snapshot
            .roles
            .iter()
            .map(|role| RoleUserCount {
                role_id: role.id(),
                role_name: role.name().to_owned(),
                user_count: snapshot
                    .users
                    .iter()
                    .filter(|user| user.roles().iter().any(|held| held.id() == role.id()))
                    .count(),
            })
            .collect();

        Ok(DashboardStats {
            total_users: snapshot.users.len(),
            total_roles: snapshot.roles.len(),
            total_permissions: snapshot.permissions.len(),
            role_distribution,
        })
    }
}
