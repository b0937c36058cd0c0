use rolegate_domain::{EmailAddress, User, UserId, validate_password};
use tracing::info;

use crate::directory_ports::{CreateUserInput, UpdateUserInput};

use super::*;

impl DirectoryService {
    /// Lists users for operators holding `view users`.
    pub async fn list_users(&self, actor: &User) -> AppResult<Vec<User>> {
        AccessGate::require(actor, &["view users"])?;
        self.reader.list_users().await
    }

    /// Returns one user for operators holding `view users`.
    pub async fn get_user(&self, actor: &User, user_id: UserId) -> AppResult<User> {
        AccessGate::require(actor, &["view users"])?;
        self.reader
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }

    /// Creates a user with a hashed initial password.
    pub async fn create_user(&self, actor: &User, request: UserRequest) -> AppResult<User> {
        AccessGate::require(actor, &["create users"])?;

        let name = required_name(&request.name, "name")?;
        let email = EmailAddress::new(request.email)?;
        validate_password(&request.password)?;
        let password_hash = self.password_hasher.hash_password(&request.password)?;

        let user = self
            .writer
            .create_user(CreateUserInput {
                name,
                email,
                password_hash: Some(password_hash),
                role_ids: request.role_ids,
            })
            .await?;

        info!(actor_id = %actor.id(), user_id = %user.id(), "created directory user");
        Ok(user)
    }

    /// Updates a user's profile, password, roles or direct grants.
    pub async fn update_user(
        &self,
        actor: &User,
        user_id: UserId,
        request: UserUpdateRequest,
    ) -> AppResult<User> {
        AccessGate::require(actor, &["update users"])?;

        let name = required_name(&request.name, "name")?;
        let email = EmailAddress::new(request.email)?;
        let password_hash = match request
            .password
            .as_deref()
            .filter(|password| !password.is_empty())
        {
            Some(password) => {
                validate_password(password)?;
                Some(self.password_hasher.hash_password(password)?)
            }
            None => None,
        };

        let user = self
            .writer
            .update_user(
                user_id,
                UpdateUserInput {
                    name,
                    email,
                    password_hash,
                    role_ids: request.role_ids,
                    permission_ids: request.permission_ids,
                },
            )
            .await?;

        info!(actor_id = %actor.id(), %user_id, "updated directory user");
        Ok(user)
    }

    /// Deletes a user.
    pub async fn delete_user(&self, actor: &User, user_id: UserId) -> AppResult<()> {
        AccessGate::require(actor, &["delete users"])?;
        self.writer.delete_user(user_id).await?;

        info!(actor_id = %actor.id(), %user_id, "deleted directory user");
        Ok(())
    }
}
