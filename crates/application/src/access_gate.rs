//! Three-state access decisions for guarded views and navigation menus.

use rolegate_core::{AppError, AppResult, NonEmptyString};
use rolegate_domain::{NavigationEntry, User};
use serde::Serialize;
use tracing::debug;

use crate::permission_resolver::{EffectivePermissionSet, effective_permission_names, has_all};

mod guarded_view;
mod navigation;

pub use guarded_view::GuardedView;
pub use navigation::visible_entries;

/// Resolution state of the current user's authentication.
#[derive(Debug, Clone, Copy)]
pub enum AuthenticationStatus<'a> {
    /// The session lookup has not completed yet.
    Unresolved,
    /// The session lookup completed without a signed-in user.
    Unauthenticated,
    /// The session lookup returned a signed-in user.
    Authenticated(&'a User),
}

impl<'a> AuthenticationStatus<'a> {
    /// Builds a resolved status from an optional current user.
    #[must_use]
    pub fn from_current_user(user: Option<&'a User>) -> Self {
        match user {
            Some(user) => Self::Authenticated(user),
            None => Self::Unauthenticated,
        }
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&'a User> {
        match *self {
            Self::Authenticated(user) => Some(user),
            Self::Unresolved | Self::Unauthenticated => None,
        }
    }
}

/// Why access to a guarded view was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    /// Nobody is signed in; the caller must be sent to sign-in.
    Unauthenticated,
    /// The signed-in user lacks some required permissions.
    InsufficientPermission {
        /// Required names the user does not hold.
        missing: Vec<String>,
    },
}

/// Outcome of gating a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Authentication has not resolved yet.
    Pending,
    /// Access is refused.
    Denied(DenialReason),
    /// Access is allowed.
    Granted,
}

impl AccessDecision {
    /// Returns whether access is allowed.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns whether the decision is still waiting on authentication.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns whether the caller has to be redirected to sign-in.
    #[must_use]
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::Denied(DenialReason::Unauthenticated))
    }

    /// Converts the decision into an application result for request handlers.
    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Self::Granted => Ok(()),
            Self::Pending | Self::Denied(DenialReason::Unauthenticated) => Err(
                AppError::Unauthorized("authentication required".to_owned()),
            ),
            Self::Denied(DenialReason::InsufficientPermission { missing }) => {
                Err(AppError::Forbidden(format!(
                    "missing required permissions: {}",
                    missing
                        .iter()
                        .map(|name| format!("'{name}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        }
    }
}

/// Navigation collaborator told to send an unauthenticated caller to sign-in.
pub trait SignInRedirect: Send + Sync {
    /// Requests a redirect to the sign-in entry point.
    fn redirect_to_sign_in(&self);
}

/// Stateless gate combining authentication status and the permission resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGate;

impl AccessGate {
    /// Rejects a requirement list containing a blank permission name.
    pub fn validate_requirement<S: AsRef<str>>(required: &[S]) -> AppResult<()> {
        for name in required {
            NonEmptyString::new(name.as_ref()).map_err(|_| {
                AppError::Validation("required permission names must not be empty".to_owned())
            })?;
        }

        Ok(())
    }

    /// Evaluates a requirement without side effects.
    ///
    /// An empty requirement never bypasses the authentication check. Names are
    /// expected to be validated already, see [`AccessGate::validate_requirement`].
    #[must_use]
    pub fn evaluate<S: AsRef<str>>(
        status: &AuthenticationStatus<'_>,
        required: &[S],
    ) -> AccessDecision {
        match status {
            AuthenticationStatus::Unresolved => AccessDecision::Pending,
            AuthenticationStatus::Unauthenticated => {
                AccessDecision::Denied(DenialReason::Unauthenticated)
            }
            AuthenticationStatus::Authenticated(user) => {
                Self::evaluate_effective(&effective_permission_names(Some(user)), required)
            }
        }
    }

    /// Evaluates a requirement for an authenticated user whose effective
    /// permissions were already resolved.
    #[must_use]
    pub fn evaluate_effective<S: AsRef<str>>(
        effective: &EffectivePermissionSet,
        required: &[S],
    ) -> AccessDecision {
        if has_all(effective, required) {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied(DenialReason::InsufficientPermission {
                missing: effective.missing(required),
            })
        }
    }

    /// Evaluates a requirement and signals the sign-in redirect when nobody
    /// is signed in. Insufficient permissions never redirect.
    pub fn resolve<S: AsRef<str>>(
        status: &AuthenticationStatus<'_>,
        required: &[S],
        redirect: &dyn SignInRedirect,
    ) -> AccessDecision {
        let decision = Self::evaluate(status, required);
        match &decision {
            AccessDecision::Denied(DenialReason::Unauthenticated) => {
                debug!("access denied without session, redirecting to sign-in");
                redirect.redirect_to_sign_in();
            }
            AccessDecision::Denied(DenialReason::InsufficientPermission { missing }) => {
                debug!(?missing, "access denied for missing permissions");
            }
            AccessDecision::Pending | AccessDecision::Granted => {}
        }

        decision
    }

    /// Ensures an authenticated user holds every required permission.
    pub fn require<S: AsRef<str>>(user: &User, required: &[S]) -> Result<(), AppError> {
        Self::validate_requirement(required)?;
        Self::evaluate(&AuthenticationStatus::Authenticated(user), required).into_result()
    }

    /// Returns the navigation entries the current user may see.
    ///
    /// Nothing is visible until a user is signed in.
    #[must_use]
    pub fn navigation(
        status: &AuthenticationStatus<'_>,
        entries: &[NavigationEntry],
    ) -> Vec<NavigationEntry> {
        match status.user() {
            Some(user) => visible_entries(&effective_permission_names(Some(user)), entries),
            None => Vec::new(),
        }
    }
}
