use rolegate_core::AppResult;

use super::{AccessDecision, AccessGate, AuthenticationStatus, SignInRedirect};

/// Gate state for one view across a page load.
///
/// Starts pending and settles exactly once, when authentication resolves.
/// Later resolutions return the settled decision and never signal again.
#[derive(Debug, Clone)]
pub struct GuardedView {
    required: Vec<String>,
    decision: AccessDecision,
}

impl GuardedView {
    /// Creates a pending guard for the required permission names.
    ///
    /// A blank name is rejected.
    pub fn new<S: AsRef<str>>(required: &[S]) -> AppResult<Self> {
        AccessGate::validate_requirement(required)?;

        Ok(Self {
            required: required.iter().map(|name| name.as_ref().to_owned()).collect(),
            decision: AccessDecision::Pending,
        })
    }

    /// Returns the required permission names.
    #[must_use]
    pub fn required(&self) -> &[String] {
        self.required.as_slice()
    }

    /// Returns the current decision.
    #[must_use]
    pub fn decision(&self) -> &AccessDecision {
        &self.decision
    }

    /// Applies the authentication outcome.
    ///
    /// An unresolved status keeps the guard pending.
    pub fn resolve_authentication(
        &mut self,
        status: &AuthenticationStatus<'_>,
        redirect: &dyn SignInRedirect,
    ) -> &AccessDecision {
        if self.decision.is_pending() && !matches!(status, AuthenticationStatus::Unresolved) {
            self.decision = AccessGate::resolve(status, &self.required, redirect);
        }

        &self.decision
    }
}
