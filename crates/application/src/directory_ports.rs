mod inputs;
mod repositories;

pub use inputs::{
    CreatePermissionInput, CreateRoleInput, CreateUserInput, StoredCredentials,
    UpdatePermissionInput, UpdateRoleInput, UpdateUserInput,
};
pub use repositories::{
    CredentialRepository, CurrentUserProvider, DirectoryReader, DirectoryWriter,
    RolePermissionUpdater,
};
