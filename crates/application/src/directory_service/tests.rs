use std::sync::Arc;
use std::sync::atomic::Ordering;

use rolegate_core::{AppError, SessionIdentity};
use rolegate_domain::{PermissionId, RoleId, User, UserId};

use crate::assignment_matrix::{AssignmentDiff, RoleGrant};
use crate::test_support::{FakeDirectory, FakePasswordHasher, directory_snapshot};

use super::{
    DirectoryService, PermissionRequest, RoleRequest, UserRequest, UserUpdateRequest,
};

fn service() -> (DirectoryService, Arc<FakeDirectory>) {
    let directory = Arc::new(FakeDirectory::new(directory_snapshot()));
    let service = DirectoryService::new(
        directory.clone(),
        directory.clone(),
        directory.clone(),
        Arc::new(FakePasswordHasher),
    );

    (service, directory)
}

fn actor(user_id: i64) -> User {
    let snapshot = directory_snapshot();
    let Some(user) = snapshot
        .users
        .into_iter()
        .find(|user| user.id() == UserId::new(user_id))
    else {
        panic!("missing fixture user {user_id}");
    };

    user
}

fn grant(role_id: i64, permission_id: i64) -> RoleGrant {
    RoleGrant::new(RoleId::new(role_id), PermissionId::new(permission_id))
}

#[tokio::test]
async fn resolve_actor_loads_directory_user() {
    let (service, _) = service();
    let identity = SessionIdentity::new(2, "User 2", "user2@example.com");

    let user = service.resolve_actor(&identity).await;

    assert!(user.is_ok_and(|user| user.roles().len() == 1));
}

#[tokio::test]
async fn resolve_actor_rejects_removed_user() {
    let (service, _) = service();
    let identity = SessionIdentity::new(42, "Gone", "gone@example.com");

    let result = service.resolve_actor(&identity).await;

    assert!(matches!(result, Err(AppError::Unauthorized(_))));
}

#[tokio::test]
async fn listing_users_requires_view_users() {
    let (service, directory) = service();

    let denied = service.list_users(&actor(3)).await;
    assert!(matches!(denied, Err(AppError::Forbidden(message)) if message.contains("view users")));
    assert_eq!(directory.read_count(), 0);

    let listed = service.list_users(&actor(2)).await;
    assert!(listed.is_ok_and(|users| users.len() == 3));
}

#[tokio::test]
async fn create_user_validates_and_hashes_password() {
    let (service, directory) = service();

    let created = service
        .create_user(
            &actor(1),
            UserRequest {
                name: "  Jane Doe ".to_owned(),
                email: "Jane@Example.com".to_owned(),
                password: "secret1".to_owned(),
                role_ids: vec![RoleId::new(2)],
            },
        )
        .await;
    assert!(created.is_ok());

    let inputs = directory.created_users.lock().await;
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].name.as_str(), "Jane Doe");
    assert_eq!(inputs[0].email.as_str(), "jane@example.com");
    assert_eq!(inputs[0].password_hash.as_deref(), Some("hashed:secret1"));
    assert_eq!(inputs[0].role_ids, vec![RoleId::new(2)]);
}

#[tokio::test]
async fn create_user_rejects_short_password_before_writing() {
    let (service, directory) = service();

    let result = service
        .create_user(
            &actor(1),
            UserRequest {
                name: "Jane".to_owned(),
                email: "jane@example.com".to_owned(),
                password: "12345".to_owned(),
                role_ids: Vec::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(directory.created_users.lock().await.is_empty());
}

#[tokio::test]
async fn viewer_cannot_create_users() {
    let (service, directory) = service();

    let result = service
        .create_user(
            &actor(2),
            UserRequest {
                name: "Jane".to_owned(),
                email: "jane@example.com".to_owned(),
                password: "secret1".to_owned(),
                role_ids: Vec::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(directory.created_users.lock().await.is_empty());
}

#[tokio::test]
async fn blank_password_on_update_keeps_current_hash() {
    let (service, directory) = service();

    let result = service
        .update_user(
            &actor(1),
            UserId::new(2),
            UserUpdateRequest {
                name: "User Two".to_owned(),
                email: "user2@example.com".to_owned(),
                password: Some(String::new()),
                role_ids: None,
                permission_ids: Some(vec![PermissionId::new(6)]),
            },
        )
        .await;
    assert!(result.is_ok());

    let updates = directory.updated_users.lock().await;
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, UserId::new(2));
    assert!(updates[0].1.password_hash.is_none());
    assert_eq!(updates[0].1.permission_ids, Some(vec![PermissionId::new(6)]));
}

#[tokio::test]
async fn role_guard_defaults_to_web() {
    let (service, directory) = service();

    let role = service
        .create_role(
            &actor(1),
            RoleRequest {
                name: "Auditor".to_owned(),
                guard_name: None,
                permission_ids: vec![PermissionId::new(2)],
            },
        )
        .await;

    assert!(role.is_ok_and(|role| role.guard_name() == "web"));
    assert_eq!(directory.created_roles.lock().await[0].permission_ids.len(), 1);
}

#[tokio::test]
async fn blank_guard_or_name_is_rejected() {
    let (service, _) = service();

    let blank_guard = service
        .create_permission(
            &actor(1),
            PermissionRequest {
                name: "view reports".to_owned(),
                guard_name: Some("  ".to_owned()),
            },
        )
        .await;
    assert!(matches!(blank_guard, Err(AppError::Validation(message)) if message.contains("guard")));

    let blank_name = service
        .create_role(
            &actor(1),
            RoleRequest {
                name: " ".to_owned(),
                guard_name: None,
                permission_ids: Vec::new(),
            },
        )
        .await;
    assert!(matches!(blank_name, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn deletes_are_gated_per_resource() {
    let (service, directory) = service();

    assert!(service.delete_role(&actor(1), RoleId::new(2)).await.is_ok());
    assert!(
        service
            .delete_permission(&actor(2), PermissionId::new(3))
            .await
            .is_err()
    );

    assert_eq!(*directory.deleted.lock().await, vec!["role:2".to_owned()]);
}

#[tokio::test]
async fn role_permission_diff_is_applied() {
    let (service, directory) = service();
    let diff = AssignmentDiff {
        grants: vec![grant(2, 6)],
        revokes: vec![grant(2, 2)],
    };

    assert!(
        service
            .apply_role_permission_diff(&actor(1), diff.clone())
            .await
            .is_ok()
    );

    assert_eq!(*directory.applied_diffs.lock().await, vec![diff]);
}

#[tokio::test]
async fn contradictory_or_empty_diff_never_reaches_store() {
    let (service, directory) = service();

    let contradictory = service
        .apply_role_permission_diff(
            &actor(1),
            AssignmentDiff {
                grants: vec![grant(2, 6)],
                revokes: vec![grant(2, 6)],
            },
        )
        .await;
    assert!(matches!(contradictory, Err(AppError::Validation(_))));

    let empty = service
        .apply_role_permission_diff(&actor(1), AssignmentDiff::default())
        .await;
    assert!(empty.is_ok());

    assert!(directory.applied_diffs.lock().await.is_empty());
}

#[tokio::test]
async fn role_permission_diff_requires_update_roles() {
    let (service, directory) = service();

    let result = service
        .apply_role_permission_diff(
            &actor(2),
            AssignmentDiff {
                grants: vec![grant(2, 6)],
                revokes: Vec::new(),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::Forbidden(message)) if message.contains("update roles")
    ));
    assert!(directory.applied_diffs.lock().await.is_empty());
}

#[tokio::test]
async fn store_failure_is_returned_to_caller() {
    let (service, directory) = service();
    directory.fail_updates.store(true, Ordering::SeqCst);

    let result = service
        .apply_role_permission_diff(
            &actor(1),
            AssignmentDiff {
                grants: vec![grant(2, 6)],
                revokes: Vec::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn matrix_view_is_filtered_and_grouped() {
    let (service, _) = service();

    let view = service.matrix_view(&actor(1), "USERS").await;
    let Ok(view) = view else {
        panic!("matrix view should be readable by admins");
    };

    assert_eq!(view.roles.len(), 2);
    let categories: Vec<&str> = view
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(categories, vec!["view", "create", "update", "delete"]);
    assert_eq!(view.pending_change_count, 0);
}

#[tokio::test]
async fn templates_are_offered_to_permission_creators() {
    let (service, _) = service();

    let catalog = service.permission_templates(&actor(1));
    assert!(catalog.is_ok_and(|catalog| {
        catalog.templates.len() == 5 && catalog.resource_types.contains(&"reports")
    }));

    assert!(service.permission_templates(&actor(2)).is_err());
}
