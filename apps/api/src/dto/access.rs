use rolegate_application::{AccessDecision, CurrentSession, DenialReason};
use rolegate_domain::{AdminView, NavigationEntry};
use serde::Serialize;
use ts_rs::TS;

use super::UserResponse;

/// API representation of a menu entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/navigation-entry-response.ts"
)]
pub struct NavigationEntryResponse {
    pub label: String,
    pub href: String,
    pub required_permission: Option<String>,
}

/// The signed-in user with effective permissions and visible navigation.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/session-response.ts"
)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub permissions: Vec<String>,
    pub navigation: Vec<NavigationEntryResponse>,
}

/// Gate decision for one admin view.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/view-access-response.ts"
)]
pub struct ViewAccessResponse {
    pub view: String,
    /// `pending`, `denied` or `granted`.
    pub state: String,
    pub requires_sign_in: bool,
    /// Required permissions the user lacks; empty unless denied for
    /// insufficient permission.
    pub missing: Vec<String>,
}

impl From<NavigationEntry> for NavigationEntryResponse {
    fn from(value: NavigationEntry) -> Self {
        Self {
            label: value.label,
            href: value.href,
            required_permission: value.required_permission,
        }
    }
}

impl From<CurrentSession> for SessionResponse {
    fn from(value: CurrentSession) -> Self {
        Self {
            user: UserResponse::from(&value.user),
            permissions: value.permissions.into_vec(),
            navigation: value
                .navigation
                .into_iter()
                .map(NavigationEntryResponse::from)
                .collect(),
        }
    }
}

impl ViewAccessResponse {
    /// Creates a response for a view and its gate decision.
    #[must_use]
    pub fn new(view: AdminView, decision: AccessDecision) -> Self {
        let requires_sign_in = decision.requires_sign_in();
        let (state, missing) = match decision {
            AccessDecision::Pending => ("pending", Vec::new()),
            AccessDecision::Granted => ("granted", Vec::new()),
            AccessDecision::Denied(DenialReason::Unauthenticated) => ("denied", Vec::new()),
            AccessDecision::Denied(DenialReason::InsufficientPermission { missing }) => {
                ("denied", missing)
            }
        };

        Self {
            view: view.as_str().to_owned(),
            state: state.to_owned(),
            requires_sign_in,
            missing,
        }
    }
}
