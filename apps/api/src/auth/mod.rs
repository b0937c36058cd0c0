mod password;
mod session;

use rolegate_core::{AppError, SessionIdentity};
use rolegate_domain::User;
use tower_sessions::Session;

use crate::error::ApiResult;
use crate::state::AppState;

pub use password::login_handler;
pub use session::{logout_handler, me_handler};

pub const SESSION_USER_KEY: &str = "user_identity";

/// Reads the signed-in user without requiring one.
///
/// Returns `None` when the session is empty or its user no longer exists.
pub async fn optional_session_user(state: &AppState, session: &Session) -> ApiResult<Option<User>> {
    let Some(identity) = session
        .get::<SessionIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
    else {
        return Ok(None);
    };

    match state.directory_service.resolve_actor(&identity).await {
        Ok(user) => Ok(Some(user)),
        Err(AppError::Unauthorized(_)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}
