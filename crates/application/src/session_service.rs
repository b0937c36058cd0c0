//! Sign-in and current-session resolution.
//!
//! Failed sign-ins return one generic message whether the email is unknown
//! or the password is wrong, and a hash is computed on every path.

use std::sync::Arc;

use rolegate_core::{AppError, AppResult, SessionIdentity};
use rolegate_domain::{EmailAddress, NavigationEntry, User, admin_navigation};
use serde::Serialize;
use tracing::{info, warn};

use crate::directory_ports::{CredentialRepository, DirectoryReader};
use crate::{AccessGate, AuthenticationStatus, EffectivePermissionSet, effective_permission_names};

/// Port for password hashing operations. Keeps the application layer free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// The signed-in user with everything the shell needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSession {
    /// Signed-in user with embedded roles and direct grants.
    pub user: User,
    /// Flattened permission names.
    pub permissions: EffectivePermissionSet,
    /// Navigation entries the user may see.
    pub navigation: Vec<NavigationEntry>,
}

/// Application service for password sign-in.
#[derive(Clone)]
pub struct SessionService {
    credentials: Arc<dyn CredentialRepository>,
    reader: Arc<dyn DirectoryReader>,
    password_hasher: Arc<dyn PasswordHasher>,
}

const INVALID_CREDENTIALS: &str = "invalid email or password";

impl SessionService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        reader: Arc<dyn DirectoryReader>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            credentials,
            reader,
            password_hasher,
        }
    }

    /// Verifies credentials and returns the identity to store in the session.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionIdentity> {
        let Ok(email) = EmailAddress::new(email) else {
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        let Some(credentials) = self.credentials.find_credentials_by_email(&email).await? else {
            let _ = self.password_hasher.hash_password(password);
            warn!("sign-in rejected for unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        if !self
            .password_hasher
            .verify_password(password, &credentials.password_hash)?
        {
            warn!(user_id = %credentials.user_id, "sign-in rejected for wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        let Some(user) = self.reader.find_user(credentials.user_id).await? else {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        info!(user_id = %user.id(), "user signed in");
        Ok(SessionIdentity::new(
            user.id().as_i64(),
            user.name(),
            user.email().as_str(),
        ))
    }

    /// Builds the current-session payload for an already resolved user.
    #[must_use]
    pub fn current_session(&self, user: User) -> CurrentSession {
        let permissions = effective_permission_names(Some(&user));
        let navigation = AccessGate::navigation(
            &AuthenticationStatus::Authenticated(&user),
            &admin_navigation(),
        );

        CurrentSession {
            user,
            permissions,
            navigation,
        }
    }
}
