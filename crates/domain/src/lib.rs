//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod directory;
mod ids;
mod navigation;
mod permission;
mod role;
mod user;

pub use directory::DirectorySnapshot;
pub use ids::{PermissionId, RoleId, UserId};
pub use navigation::{AdminView, NavigationEntry, admin_navigation};
pub use permission::{
    DEFAULT_GUARD_NAME, PERMISSION_RESOURCE_TYPES, Permission, PermissionTemplate,
    permission_category, permission_templates,
};
pub use role::Role;
pub use user::{EmailAddress, PASSWORD_MIN_LENGTH, User, validate_password};
