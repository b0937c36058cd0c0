//! Authorization core and application services for the Rolegate directory.

#![forbid(unsafe_code)]

mod access_gate;
mod admin_console;
mod assignment_matrix;
mod dashboard_service;
mod directory_ports;
mod directory_service;
mod permission_resolver;
mod session_service;

#[cfg(test)]
mod test_support;

pub use access_gate::{
    AccessDecision, AccessGate, AuthenticationStatus, DenialReason, GuardedView, SignInRedirect,
    visible_entries,
};
pub use admin_console::AdminConsole;
pub use assignment_matrix::{
    AssignmentDiff, AssignmentMatrixEditor, MatrixCategory, MatrixCell, MatrixRole, MatrixRow,
    MatrixView, PermissionCategoryGroup, RoleGrant, RolePermissionSelection, filter_permissions,
    group_by_category,
};
pub use dashboard_service::{DashboardService, DashboardStats, RoleUserCount};
pub use directory_ports::{
    CreatePermissionInput, CreateRoleInput, CreateUserInput, CredentialRepository,
    CurrentUserProvider, DirectoryReader, DirectoryWriter, RolePermissionUpdater,
    StoredCredentials, UpdatePermissionInput, UpdateRoleInput, UpdateUserInput,
};
pub use directory_service::{
    DirectoryService, PermissionRequest, PermissionTemplateCatalog, RoleRequest, UserRequest,
    UserUpdateRequest,
};
pub use permission_resolver::{
    EffectivePermissionSet, effective_permission_names, has_all, has_any,
};
pub use session_service::{CurrentSession, PasswordHasher, SessionService};
