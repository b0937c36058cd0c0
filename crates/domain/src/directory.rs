use serde::{Deserialize, Serialize};

use crate::{Permission, Role, User};

/// Users, roles and permissions captured together from the directory.
///
/// Snapshots are replaced wholesale on refetch. `revision` increases on every
/// write to the backing store, so a consumer holding derived state can tell
/// whether its baseline is stale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    /// Store revision the snapshot was read at.
    pub revision: u64,
    /// All directory users with embedded roles and direct grants.
    pub users: Vec<User>,
    /// All roles with embedded grants.
    pub roles: Vec<Role>,
    /// All permissions.
    pub permissions: Vec<Permission>,
}
