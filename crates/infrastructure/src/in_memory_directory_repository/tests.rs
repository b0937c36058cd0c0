use rolegate_application::{
    AssignmentDiff, CreatePermissionInput, CreateRoleInput, CreateUserInput, CredentialRepository,
    DirectoryReader, DirectoryWriter, RoleGrant, RolePermissionUpdater, UpdateRoleInput,
    UpdateUserInput,
};
use rolegate_core::{AppError, AppResult, NonEmptyString};
use rolegate_domain::{EmailAddress, PermissionId, RoleId};

use super::InMemoryDirectoryRepository;

fn text(value: &str) -> AppResult<NonEmptyString> {
    NonEmptyString::new(value)
}

async fn permission(
    repository: &InMemoryDirectoryRepository,
    name: &str,
) -> AppResult<PermissionId> {
    let permission = repository
        .create_permission(CreatePermissionInput {
            name: text(name)?,
            guard_name: text("web")?,
        })
        .await?;

    Ok(permission.id())
}

async fn role(
    repository: &InMemoryDirectoryRepository,
    name: &str,
    permission_ids: Vec<PermissionId>,
) -> AppResult<RoleId> {
    let role = repository
        .create_role(CreateRoleInput {
            name: text(name)?,
            guard_name: text("web")?,
            permission_ids,
        })
        .await?;

    Ok(role.id())
}

fn user_input(email: &str, role_ids: Vec<RoleId>) -> AppResult<CreateUserInput> {
    Ok(CreateUserInput {
        name: text("Jane Smith")?,
        email: EmailAddress::new(email)?,
        password_hash: Some("stored-hash".to_owned()),
        role_ids,
    })
}

#[tokio::test]
async fn users_embed_roles_and_grants() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let view_users = permission(&repository, "view users").await?;
    let viewer = role(&repository, "Viewer", vec![view_users]).await?;

    let user = repository
        .create_user(user_input("jane@example.com", vec![viewer])?)
        .await?;

    assert_eq!(user.roles().len(), 1);
    assert_eq!(user.roles()[0].permissions()[0].name(), "view users");
    let found = repository.find_user(user.id()).await?;
    assert_eq!(found, Some(user));
    Ok(())
}

#[tokio::test]
async fn duplicate_names_and_emails_conflict() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    permission(&repository, "view users").await?;
    role(&repository, "Viewer", Vec::new()).await?;
    repository
        .create_user(user_input("jane@example.com", Vec::new())?)
        .await?;

    assert!(matches!(
        permission(&repository, "view users").await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        role(&repository, "Viewer", Vec::new()).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        repository
            .create_user(user_input("JANE@example.com", Vec::new())?)
            .await,
        Err(AppError::Conflict(_))
    ));

    let api_guard = repository
        .create_permission(CreatePermissionInput {
            name: text("view users")?,
            guard_name: text("api")?,
        })
        .await;
    assert!(api_guard.is_ok());
    Ok(())
}

#[tokio::test]
async fn unknown_role_reference_is_rejected() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();

    let result = repository
        .create_user(user_input("jane@example.com", vec![RoleId::new(9)])?)
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(repository.list_users().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn permission_rename_is_visible_through_roles() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let view_users = permission(&repository, "view users").await?;
    role(&repository, "Viewer", vec![view_users]).await?;

    repository
        .update_permission(
            view_users,
            CreatePermissionInput {
                name: text("view accounts")?,
                guard_name: text("web")?,
            },
        )
        .await?;

    let roles = repository.list_roles().await?;
    assert_eq!(roles[0].permissions()[0].name(), "view accounts");
    Ok(())
}

#[tokio::test]
async fn deleting_permission_cascades_to_roles_and_users() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let view_users = permission(&repository, "view users").await?;
    let viewer = role(&repository, "Viewer", vec![view_users]).await?;
    let user = repository
        .create_user(user_input("jane@example.com", vec![viewer])?)
        .await?;
    repository
        .update_user(
            user.id(),
            UpdateUserInput {
                name: text("Jane Smith")?,
                email: EmailAddress::new("jane@example.com")?,
                password_hash: None,
                role_ids: None,
                permission_ids: Some(vec![view_users]),
            },
        )
        .await?;

    repository.delete_permission(view_users).await?;

    let snapshot = repository.snapshot().await?;
    assert!(snapshot.permissions.is_empty());
    assert!(snapshot.roles[0].permissions().is_empty());
    assert!(snapshot.users[0].permissions().is_empty());
    assert!(snapshot.users[0].roles()[0].permissions().is_empty());
    Ok(())
}

#[tokio::test]
async fn deleting_role_removes_memberships() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let viewer = role(&repository, "Viewer", Vec::new()).await?;
    let user = repository
        .create_user(user_input("jane@example.com", vec![viewer])?)
        .await?;

    repository.delete_role(viewer).await?;

    let reloaded = repository.find_user(user.id()).await?;
    assert!(reloaded.is_some_and(|user| user.roles().is_empty()));
    assert!(matches!(
        repository.delete_role(viewer).await,
        Err(AppError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn role_rename_keeps_grants() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let view_users = permission(&repository, "view users").await?;
    let viewer = role(&repository, "Viewer", vec![view_users]).await?;

    let renamed = repository
        .update_role(
            viewer,
            UpdateRoleInput {
                name: text("Reader")?,
                guard_name: text("web")?,
            },
        )
        .await?;

    assert_eq!(renamed.name(), "Reader");
    assert!(renamed.grants(view_users));
    Ok(())
}

#[tokio::test]
async fn diff_is_applied_and_bumps_revision() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let view_users = permission(&repository, "view users").await?;
    let delete_users = permission(&repository, "delete users").await?;
    let editor = role(&repository, "Editor", vec![view_users]).await?;
    let before = repository.revision().await;

    repository
        .apply_role_permission_diff(&AssignmentDiff {
            grants: vec![RoleGrant::new(editor, delete_users)],
            revokes: vec![RoleGrant::new(editor, view_users)],
        })
        .await?;

    let roles = repository.list_roles().await?;
    assert!(roles[0].grants(delete_users));
    assert!(!roles[0].grants(view_users));
    assert!(repository.revision().await > before);
    Ok(())
}

#[tokio::test]
async fn diff_with_unknown_reference_changes_nothing() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let view_users = permission(&repository, "view users").await?;
    let editor = role(&repository, "Editor", Vec::new()).await?;
    let before = repository.snapshot().await?;

    let result = repository
        .apply_role_permission_diff(&AssignmentDiff {
            grants: vec![
                RoleGrant::new(editor, view_users),
                RoleGrant::new(editor, PermissionId::new(99)),
            ],
            revokes: Vec::new(),
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(repository.snapshot().await?, before);
    Ok(())
}

#[tokio::test]
async fn credentials_are_found_by_email() -> AppResult<()> {
    let repository = InMemoryDirectoryRepository::new();
    let user = repository
        .create_user(user_input("jane@example.com", Vec::new())?)
        .await?;

    let credentials = repository
        .find_credentials_by_email(&EmailAddress::new("Jane@Example.com")?)
        .await?;
    assert!(credentials.is_some_and(|credentials| {
        credentials.user_id == user.id() && credentials.password_hash == "stored-hash"
    }));

    let missing = repository
        .find_credentials_by_email(&EmailAddress::new("john@example.com")?)
        .await?;
    assert!(missing.is_none());
    Ok(())
}
