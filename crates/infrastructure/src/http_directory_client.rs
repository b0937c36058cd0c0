//! Directory ports backed by a remote admin API speaking the
//! `{ data, message }` JSON envelope.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use rolegate_application::{
    AssignmentDiff, CurrentUserProvider, DirectoryReader, RolePermissionUpdater,
};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{DirectorySnapshot, Permission, Role, User, UserId};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

mod envelope;

use envelope::{ApiEnvelope, error_for_status};

/// Connection settings for [`HttpDirectoryClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpDirectoryClientConfig {
    /// API root, e.g. `http://localhost:3001/api`.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpDirectoryClientConfig {
    /// Creates a config with a ten second timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Default)]
struct ObservedDirectory {
    revision: u64,
    last: Option<(Vec<User>, Vec<Role>, Vec<Permission>)>,
}

/// HTTP adapter for the directory read, current-user and grant-update ports.
///
/// The remote API exposes no revision, so the client numbers the distinct
/// directory contents it has observed.
pub struct HttpDirectoryClient {
    http_client: reqwest::Client,
    base_url: Url,
    observed: Mutex<ObservedDirectory>,
}

#[derive(Deserialize)]
struct CurrentSessionPayload {
    user: User,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpDirectoryClient {
    /// Creates a client with its own cookie-keeping connection pool.
    pub fn new(config: HttpDirectoryClientConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        let mut base_url = config.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
            observed: Mutex::new(ObservedDirectory::default()),
        })
    }

    /// Signs in; the session cookie is kept for later requests.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        self.request(Method::POST, "login", Some(&LoginRequest { email, password }))
            .await?
            .ok_or_else(|| AppError::Internal("sign-in response carried no user".to_owned()))
    }

    /// Ends the remote session.
    pub async fn logout(&self) -> AppResult<()> {
        self.request::<serde_json::Value, ()>(Method::POST, "logout", None)
            .await
            .map(|_| ())
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|error| AppError::Internal(format!("invalid endpoint '{path}': {error}")))
    }

    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "directory request");

        let mut builder = self
            .http_client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|error| {
            warn!(path, %error, "directory request failed");
            AppError::Internal(format!("directory request to '{path}' failed: {error}"))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|error| {
            AppError::Internal(format!("failed to read directory response: {error}"))
        })?;
        let envelope = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<ApiEnvelope<T>>(&text).ok()
        };

        if !status.is_success() {
            let (message, errors) = envelope
                .map(|envelope| (envelope.message, envelope.errors))
                .unwrap_or_default();
            return Err(error_for_status(status, message, &errors));
        }

        match envelope {
            Some(envelope) => Ok(envelope.data),
            None if text.trim().is_empty() => Ok(None),
            None => Err(AppError::Internal(format!(
                "directory response from '{path}' is not a valid envelope"
            ))),
        }
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        Ok(self
            .request::<Vec<T>, ()>(Method::GET, path, None)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl DirectoryReader for HttpDirectoryClient {
    async fn snapshot(&self) -> AppResult<DirectorySnapshot> {
        let (users, roles, permissions) = tokio::try_join!(
            self.list_users(),
            self.list_roles(),
            self.list_permissions()
        )?;

        let mut observed = self.observed.lock().await;
        let content = (users, roles, permissions);
        if observed.last.as_ref() != Some(&content) {
            observed.revision = observed.revision.saturating_add(1);
            observed.last = Some(content.clone());
        }

        let (users, roles, permissions) = content;
        Ok(DirectorySnapshot {
            revision: observed.revision,
            users,
            roles,
            permissions,
        })
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.fetch_list("users").await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.fetch_list("roles").await
    }

    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.fetch_list("permissions").await
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        match self
            .request::<User, ()>(Method::GET, &format!("users/{user_id}"), None)
            .await
        {
            Err(AppError::NotFound(_)) => Ok(None),
            result => result,
        }
    }
}

#[async_trait]
impl CurrentUserProvider for HttpDirectoryClient {
    async fn current_user(&self) -> AppResult<Option<User>> {
        match self
            .request::<CurrentSessionPayload, ()>(Method::GET, "me", None)
            .await
        {
            Err(AppError::Unauthorized(_)) => Ok(None),
            result => result.map(|payload| payload.map(|payload| payload.user)),
        }
    }
}

#[async_trait]
impl RolePermissionUpdater for HttpDirectoryClient {
    async fn apply_role_permission_diff(&self, diff: &AssignmentDiff) -> AppResult<()> {
        self.request::<serde_json::Value, AssignmentDiff>(
            Method::PUT,
            "role-permissions",
            Some(diff),
        )
        .await?;

        Ok(())
    }
}
