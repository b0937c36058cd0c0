//! Demo directory loaded into a fresh in-memory store for local development.

use rolegate_application::{
    CreatePermissionInput, CreateRoleInput, CreateUserInput, DirectoryWriter,
};
use rolegate_core::{AppResult, NonEmptyString};
use rolegate_domain::{DEFAULT_GUARD_NAME, EmailAddress, PermissionId};
use tracing::info;

use crate::InMemoryDirectoryRepository;

/// Permissions created by the demo seed, in id order.
pub const DEMO_PERMISSIONS: &[&str] = &[
    "view dashboard",
    "view users",
    "create users",
    "update users",
    "delete users",
    "view roles",
    "create roles",
    "update roles",
    "delete roles",
    "view permissions",
    "create permissions",
    "update permissions",
    "delete permissions",
    "view settings",
];

/// Sign-in email of the seeded administrator.
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";

/// Seeds three roles and three users sharing one password hash.
///
/// Super Admin holds every permission, Editor the dashboard and user
/// management, Viewer the read-only permissions.
pub async fn seed_demo_directory(
    repository: &InMemoryDirectoryRepository,
    password_hash: &str,
) -> AppResult<()> {
    let guard = NonEmptyString::new(DEFAULT_GUARD_NAME)?;

    let mut permission_ids: Vec<PermissionId> = Vec::with_capacity(DEMO_PERMISSIONS.len());
    for name in DEMO_PERMISSIONS {
        let permission = repository
            .create_permission(CreatePermissionInput {
                name: NonEmptyString::new(*name)?,
                guard_name: guard.clone(),
            })
            .await?;
        permission_ids.push(permission.id());
    }

    let granted = |names: &[&str]| -> Vec<PermissionId> {
        DEMO_PERMISSIONS
            .iter()
            .zip(&permission_ids)
            .filter(|(name, _)| names.contains(*name))
            .map(|(_, permission_id)| *permission_id)
            .collect()
    };

    let mut role_ids = Vec::new();
    for (name, permissions) in [
        ("Super Admin", permission_ids.clone()),
        ("Editor", granted(&DEMO_PERMISSIONS[..5])),
        (
            "Viewer",
            granted(&["view dashboard", "view users", "view roles", "view permissions"]),
        ),
    ] {
        let role = repository
            .create_role(CreateRoleInput {
                name: NonEmptyString::new(name)?,
                guard_name: guard.clone(),
                permission_ids: permissions,
            })
            .await?;
        role_ids.push(role.id());
    }

    for ((name, email), role_id) in [
        ("Admin User", DEMO_ADMIN_EMAIL),
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
    ]
    .into_iter()
    .zip(role_ids)
    {
        repository
            .create_user(CreateUserInput {
                name: NonEmptyString::new(name)?,
                email: EmailAddress::new(email)?,
                password_hash: Some(password_hash.to_owned()),
                role_ids: vec![role_id],
            })
            .await?;
    }

    info!(
        permissions = DEMO_PERMISSIONS.len(),
        admin_email = DEMO_ADMIN_EMAIL,
        "seeded demo directory"
    );
    Ok(())
}
