//! Operator-side composition of the gate and the matrix editor over the
//! directory ports, as used by a client talking to a remote directory.

use std::sync::Arc;

use rolegate_core::{AppError, AppResult};
use rolegate_domain::{AdminView, NavigationEntry, User, admin_navigation};
use tracing::debug;

use crate::assignment_matrix::{AssignmentDiff, AssignmentMatrixEditor};
use crate::directory_ports::{CurrentUserProvider, DirectoryReader, RolePermissionUpdater};
use crate::{AccessDecision, AccessGate, AuthenticationStatus, SignInRedirect};

/// One operator's view of the admin console.
pub struct AdminConsole {
    reader: Arc<dyn DirectoryReader>,
    current_user_provider: Arc<dyn CurrentUserProvider>,
    updater: Arc<dyn RolePermissionUpdater>,
    session_resolved: bool,
    current_user: Option<User>,
    matrix: Option<AssignmentMatrixEditor>,
}

impl AdminConsole {
    /// Creates a console whose session has not been resolved yet.
    #[must_use]
    pub fn new(
        reader: Arc<dyn DirectoryReader>,
        current_user_provider: Arc<dyn CurrentUserProvider>,
        updater: Arc<dyn RolePermissionUpdater>,
    ) -> Self {
        Self {
            reader,
            current_user_provider,
            updater,
            session_resolved: false,
            current_user: None,
            matrix: None,
        }
    }

    /// Fetches the signed-in user. Until this completes every view is pending.
    pub async fn refresh_session(&mut self) -> AppResult<Option<&User>> {
        self.current_user = self.current_user_provider.current_user().await?;
        self.session_resolved = true;
        Ok(self.current_user.as_ref())
    }

    /// Forgets the signed-in user and any open edit session.
    pub fn sign_out(&mut self) {
        self.current_user = None;
        self.matrix = None;
    }

    /// Returns the authentication status for gating.
    #[must_use]
    pub fn authentication(&self) -> AuthenticationStatus<'_> {
        if self.session_resolved {
            AuthenticationStatus::from_current_user(self.current_user.as_ref())
        } else {
            AuthenticationStatus::Unresolved
        }
    }

    /// Gates an admin view, redirecting to sign-in when nobody is signed in.
    pub fn resolve_view(&self, view: AdminView, redirect: &dyn SignInRedirect) -> AccessDecision {
        AccessGate::resolve(
            &self.authentication(),
            &[view.required_permission()],
            redirect,
        )
    }

    /// Returns the menu entries visible to the current user.
    #[must_use]
    pub fn navigation(&self) -> Vec<NavigationEntry> {
        AccessGate::navigation(&self.authentication(), &admin_navigation())
    }

    /// Opens a fresh matrix edit session, replacing any open one.
    pub async fn open_matrix(&mut self) -> AppResult<&mut AssignmentMatrixEditor> {
        self.require(&["view roles", "view permissions"])?;

        let snapshot = self.reader.snapshot().await?;
        Ok(self
            .matrix
            .insert(AssignmentMatrixEditor::from_snapshot(&snapshot)))
    }

    /// Returns the open matrix edit session.
    #[must_use]
    pub fn matrix(&self) -> Option<&AssignmentMatrixEditor> {
        self.matrix.as_ref()
    }

    /// Returns the open matrix edit session for toggling.
    pub fn matrix_mut(&mut self) -> Option<&mut AssignmentMatrixEditor> {
        self.matrix.as_mut()
    }

    /// Re-reads the directory and rebases the open session when the store
    /// moved on. Returns the number of pending changes that were discarded.
    pub async fn refresh_matrix(&mut self) -> AppResult<usize> {
        let snapshot = self.reader.snapshot().await?;
        let Some(editor) = self.matrix.as_mut() else {
            return Err(AppError::Validation(
                "no role permission matrix is open".to_owned(),
            ));
        };

        if !editor.is_stale(snapshot.revision) {
            debug!(revision = snapshot.revision, "role permission matrix is current");
            return Ok(0);
        }

        Ok(editor.rebase(&snapshot))
    }

    /// Saves the open session's pending changes.
    pub async fn save_matrix(&mut self) -> AppResult<AssignmentDiff> {
        self.require(&["update roles"])?;

        let Some(editor) = self.matrix.as_mut() else {
            return Err(AppError::Validation(
                "no role permission matrix is open".to_owned(),
            ));
        };

        editor.save(self.updater.as_ref()).await
    }

    fn require(&self, required: &[&str]) -> AppResult<()> {
        AccessGate::validate_requirement(required)?;
        AccessGate::evaluate(&self.authentication(), required).into_result()
    }
}
