use serde::{Deserialize, Serialize};

/// User information persisted in the authenticated session.
///
/// Only the identity is stored; roles and permissions are always re-read from
/// the directory so that grants changed by an administrator apply on the next
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    user_id: i64,
    display_name: String,
    email: String,
}

impl SessionIdentity {
    /// Creates a session identity for a signed-in directory user.
    #[must_use]
    pub fn new(user_id: i64, display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// Returns the directory identifier of the signed-in user.
    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the sign-in email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
