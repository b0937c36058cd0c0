use rolegate_application::{
    PermissionRequest, PermissionTemplateCatalog, RoleRequest, UserRequest, UserUpdateRequest,
};
use rolegate_domain::{PermissionId, RoleId};

use super::{
    CreateRoleRequest, CreateUserRequest, NamedEntryRequest, PermissionTemplateResponse,
    PermissionTemplatesResponse, UpdateUserRequest,
};

impl From<CreateUserRequest> for UserRequest {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
            role_ids: value.roles.into_iter().map(RoleId::new).collect(),
        }
    }
}

impl From<UpdateUserRequest> for UserUpdateRequest {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
            role_ids: value
                .roles
                .map(|roles| roles.into_iter().map(RoleId::new).collect()),
            permission_ids: value
                .permissions
                .map(|permissions| permissions.into_iter().map(PermissionId::new).collect()),
        }
    }
}

impl From<CreateRoleRequest> for RoleRequest {
    fn from(value: CreateRoleRequest) -> Self {
        Self {
            name: value.name,
            guard_name: value.guard_name,
            permission_ids: value
                .permissions
                .into_iter()
                .map(PermissionId::new)
                .collect(),
        }
    }
}

impl From<NamedEntryRequest> for RoleRequest {
    fn from(value: NamedEntryRequest) -> Self {
        Self {
            name: value.name,
            guard_name: value.guard_name,
            permission_ids: Vec::new(),
        }
    }
}

impl From<NamedEntryRequest> for PermissionRequest {
    fn from(value: NamedEntryRequest) -> Self {
        Self {
            name: value.name,
            guard_name: value.guard_name,
        }
    }
}

impl From<PermissionTemplateCatalog> for PermissionTemplatesResponse {
    fn from(value: PermissionTemplateCatalog) -> Self {
        Self {
            templates: value
                .templates
                .iter()
                .map(PermissionTemplateResponse::from)
                .collect(),
            resource_types: value
                .resource_types
                .iter()
                .map(|resource| (*resource).to_owned())
                .collect(),
        }
    }
}
