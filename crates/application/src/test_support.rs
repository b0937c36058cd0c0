use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{
    DirectorySnapshot, EmailAddress, Permission, PermissionId, Role, RoleId, User, UserId,
};
use tokio::sync::Mutex;

use crate::assignment_matrix::AssignmentDiff;
use crate::directory_ports::{
    CreatePermissionInput, CreateRoleInput, CreateUserInput, CredentialRepository,
    CurrentUserProvider, DirectoryReader, DirectoryWriter, RolePermissionUpdater,
    StoredCredentials, UpdatePermissionInput, UpdateRoleInput, UpdateUserInput,
};
use crate::session_service::PasswordHasher;

pub(crate) fn permission(id: i64, name: &str) -> Permission {
    Permission::new(PermissionId::new(id), name, "web")
        .unwrap_or_else(|error| panic!("invalid permission fixture '{name}': {error}"))
}

pub(crate) fn role(id: i64, name: &str, permissions: Vec<Permission>) -> Role {
    Role::new(RoleId::new(id), name, "web")
        .unwrap_or_else(|error| panic!("invalid role fixture '{name}': {error}"))
        .with_permissions(permissions)
}

pub(crate) fn user(id: i64, roles: Vec<Role>, permissions: Vec<Permission>) -> User {
    User::new(UserId::new(id), format!("User {id}"), format!("user{id}@example.com"))
        .unwrap_or_else(|error| panic!("invalid user fixture {id}: {error}"))
        .with_roles(roles)
        .with_permissions(permissions)
}

pub(crate) const ADMIN_PERMISSIONS: &[&str] = &[
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
];

/// Admin (user 1) holds everything, viewer (user 2) only `view users`,
/// user 3 has no grants.
pub(crate) fn directory_snapshot() -> DirectorySnapshot {
    let permissions: Vec<Permission> = ADMIN_PERMISSIONS
        .iter()
        .zip(1..)
        .map(|(name, id)| permission(id, name))
        .collect();
    let admin_role = role(1, "Super Admin", permissions.clone());
    let viewer_role = role(2, "Viewer", vec![permissions[1].clone()]);

    DirectorySnapshot {
        revision: 1,
        users: vec![
            user(1, vec![admin_role.clone()], Vec::new()),
            user(2, vec![viewer_role.clone()], Vec::new()),
            user(3, Vec::new(), Vec::new()),
        ],
        roles: vec![admin_role, viewer_role],
        permissions,
    }
}

pub(crate) struct FakeDirectory {
    pub(crate) snapshot: Mutex<DirectorySnapshot>,
    pub(crate) credentials: Mutex<Vec<(EmailAddress, StoredCredentials)>>,
    pub(crate) current_user_id: Mutex<Option<UserId>>,
    pub(crate) created_users: Mutex<Vec<CreateUserInput>>,
    pub(crate) updated_users: Mutex<Vec<(UserId, UpdateUserInput)>>,
    pub(crate) created_roles: Mutex<Vec<CreateRoleInput>>,
    pub(crate) created_permissions: Mutex<Vec<CreatePermissionInput>>,
    pub(crate) deleted: Mutex<Vec<String>>,
    pub(crate) applied_diffs: Mutex<Vec<AssignmentDiff>>,
    pub(crate) fail_updates: AtomicBool,
    pub(crate) reads: AtomicUsize,
}

impl FakeDirectory {
    pub(crate) fn new(snapshot: DirectorySnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            credentials: Mutex::new(Vec::new()),
            current_user_id: Mutex::new(None),
            created_users: Mutex::new(Vec::new()),
            updated_users: Mutex::new(Vec::new()),
            created_roles: Mutex::new(Vec::new()),
            created_permissions: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            applied_diffs: Mutex::new(Vec::new()),
            fail_updates: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DirectoryReader for FakeDirectory {
    async fn snapshot(&self) -> AppResult<DirectorySnapshot> {
        self.record_read();
        Ok(self.snapshot.lock().await.clone())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.record_read();
        Ok(self.snapshot.lock().await.users.clone())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.record_read();
        Ok(self.snapshot.lock().await.roles.clone())
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.record_read();
        Ok(self.snapshot.lock().await.permissions.clone())
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        Ok(self
            .snapshot
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.id() == user_id)
            .cloned())
    }
}

#[async_trait]
impl DirectoryWriter for FakeDirectory {
    async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        let user = User::new(UserId::new(100), input.name.as_str(), input.email.as_str())?;
        self.created_users.lock().await.push(input);
        Ok(user)
    }

    async fn update_user(&self, user_id: UserId, input: UpdateUserInput) -> AppResult<User> {
        let user = User::new(user_id, input.name.as_str(), input.email.as_str())?;
        self.updated_users.lock().await.push((user_id, input));
        Ok(user)
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.deleted.lock().await.push(format!("user:{user_id}"));
        Ok(())
    }

    async fn create_role(&self, input: CreateRoleInput) -> AppResult<Role> {
        let role = Role::new(RoleId::new(100), input.name.as_str(), input.guard_name.as_str())?;
        self.created_roles.lock().await.push(input);
        Ok(role)
    }

    async fn update_role(&self, role_id: RoleId, input: UpdateRoleInput) -> AppResult<Role> {
        Role::new(role_id, input.name.as_str(), input.guard_name.as_str())
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        self.deleted.lock().await.push(format!("role:{role_id}"));
        Ok(())
    }

    async fn create_permission(&self, input: CreatePermissionInput) -> AppResult<Permission> {
        let permission = Permission::new(
            PermissionId::new(100),
            input.name.as_str(),
            input.guard_name.as_str(),
        )?;
        self.created_permissions.lock().await.push(input);
        Ok(permission)
    }

    async fn update_permission(
        &self,
        permission_id: PermissionId,
        input: UpdatePermissionInput,
    ) -> AppResult<Permission> {
        Permission::new(permission_id, input.name.as_str(), input.guard_name.as_str())
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<()> {
        self.deleted
            .lock()
            .await
            .push(format!("permission:{permission_id}"));
        Ok(())
    }
}

#[async_trait]
impl RolePermissionUpdater for FakeDirectory {
    async fn apply_role_permission_diff(&self, diff: &AssignmentDiff) -> AppResult<()> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::Internal("directory unavailable".to_owned()));
        }

        self.applied_diffs.lock().await.push(diff.clone());
        Ok(())
    }
}

#[async_trait]
impl CurrentUserProvider for FakeDirectory {
    async fn current_user(&self) -> AppResult<Option<User>> {
        let Some(user_id) = *self.current_user_id.lock().await else {
            return Ok(None);
        };

        self.find_user(user_id).await
    }
}

#[async_trait]
impl CredentialRepository for FakeDirectory {
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<StoredCredentials>> {
        Ok(self
            .credentials
            .lock()
            .await
            .iter()
            .find(|(stored_email, _)| stored_email == email)
            .map(|(_, credentials)| credentials.clone()))
    }
}

/// Reversible stand-in for argon2 so assertions can read the stored hash.
pub(crate) struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}
