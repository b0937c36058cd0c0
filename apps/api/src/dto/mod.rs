mod access;
mod common;
mod dashboard;
mod directory;
mod matrix;

pub use access::{NavigationEntryResponse, SessionResponse, ViewAccessResponse};
pub use common::{ApiEnvelope, HealthResponse};
pub use dashboard::DashboardStatsResponse;
pub use directory::{
    CreateRoleRequest, CreateUserRequest, LoginRequest, NamedEntryRequest, PermissionResponse,
    PermissionTemplatesResponse, RoleResponse, UpdateUserRequest, UserResponse,
};
pub use matrix::{MatrixQuery, MatrixViewResponse, RoleGrantDto, RolePermissionDiffRequest};

#[cfg(test)]
mod tests {
    use rolegate_application::{AccessDecision, AssignmentDiff, DenialReason, RoleGrant};
    use rolegate_core::AppResult;
    use rolegate_domain::{AdminView, Permission, PermissionId, Role, RoleId, User, UserId};
    use serde_json::json;

    use super::{
        ApiEnvelope, RolePermissionDiffRequest, UpdateUserRequest, UserResponse,
        ViewAccessResponse,
    };

    fn fixture_user() -> AppResult<User> {
        let view_users = Permission::new(PermissionId::new(2), "view users", "web")?;
        let role = Role::new(RoleId::new(3), "Viewer", "web")?.with_permissions([view_users]);
        let direct = Permission::new(PermissionId::new(9), "export reports", "web")?;
        Ok(User::new(UserId::new(5), "Jane Smith", "jane@example.com")?
            .with_roles([role])
            .with_permissions([direct]))
    }

    #[test]
    fn user_response_is_readable_as_a_domain_user() -> AppResult<()> {
        let user = fixture_user()?;
        let encoded = serde_json::to_value(UserResponse::from(&user)).unwrap_or_default();

        let decoded = serde_json::from_value::<User>(encoded);
        let Ok(decoded) = decoded else {
            panic!("user response must decode as a domain user: {decoded:?}");
        };
        assert_eq!(decoded.id(), user.id());
        assert_eq!(decoded.roles()[0].permissions()[0].name(), "view users");
        assert_eq!(decoded.permissions()[0].name(), "export reports");
        Ok(())
    }

    #[test]
    fn permission_response_carries_category() -> AppResult<()> {
        let user = fixture_user()?;
        let response = UserResponse::from(&user);

        assert_eq!(response.permissions[0].category, "export");
        assert_eq!(response.roles[0].permissions[0].category, "view");
        Ok(())
    }

    #[test]
    fn message_only_envelope_has_null_data() {
        let encoded = serde_json::to_value(ApiEnvelope::message("User deleted successfully"))
            .unwrap_or_default();

        assert_eq!(
            encoded,
            json!({ "data": null, "message": "User deleted successfully" })
        );
    }

    #[test]
    fn envelope_without_message_omits_it() {
        let encoded = serde_json::to_value(ApiEnvelope::data(vec![1, 2])).unwrap_or_default();

        assert_eq!(encoded, json!({ "data": [1, 2] }));
    }

    #[test]
    fn insufficient_permission_lists_missing_names() {
        let response = ViewAccessResponse::new(
            AdminView::Roles,
            AccessDecision::Denied(DenialReason::InsufficientPermission {
                missing: vec!["view roles".to_owned()],
            }),
        );

        assert_eq!(response.view, "roles");
        assert_eq!(response.state, "denied");
        assert!(!response.requires_sign_in);
        assert_eq!(response.missing, vec!["view roles".to_owned()]);
    }

    #[test]
    fn unauthenticated_decision_requires_sign_in() {
        let response = ViewAccessResponse::new(
            AdminView::Dashboard,
            AccessDecision::Denied(DenialReason::Unauthenticated),
        );

        assert_eq!(response.state, "denied");
        assert!(response.requires_sign_in);
        assert!(response.missing.is_empty());
    }

    #[test]
    fn diff_payload_matches_the_client_encoding() {
        let diff = AssignmentDiff {
            grants: vec![RoleGrant::new(RoleId::new(1), PermissionId::new(4))],
            revokes: vec![RoleGrant::new(RoleId::new(2), PermissionId::new(7))],
        };
        let encoded = serde_json::to_string(&diff).unwrap_or_default();

        let decoded = serde_json::from_str::<RolePermissionDiffRequest>(&encoded);
        let Ok(decoded) = decoded else {
            panic!("diff payload must decode: {decoded:?}");
        };
        assert_eq!(AssignmentDiff::from(decoded), diff);
    }

    #[test]
    fn update_payload_without_collections_keeps_them() {
        let payload = json!({ "name": "John Doe", "email": "john@example.com" });

        let decoded = serde_json::from_value::<UpdateUserRequest>(payload);
        let Ok(decoded) = decoded else {
            panic!("update payload must decode: {decoded:?}");
        };
        let request = rolegate_application::UserUpdateRequest::from(decoded);
        assert!(request.password.is_none());
        assert!(request.role_ids.is_none());
        assert!(request.permission_ids.is_none());
    }
}
