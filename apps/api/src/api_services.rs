use std::sync::Arc;

use rolegate_application::{DashboardService, DirectoryService, PasswordHasher, SessionService};
use rolegate_infrastructure::InMemoryDirectoryRepository;

use crate::state::AppState;

/// Wires every service to one in-memory directory.
pub fn build_app_state(
    repository: Arc<InMemoryDirectoryRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    frontend_url: String,
) -> AppState {
    let directory_service = DirectoryService::new(
        repository.clone(),
        repository.clone(),
        repository.clone(),
        password_hasher.clone(),
    );
    let session_service =
        SessionService::new(repository.clone(), repository.clone(), password_hasher);
    let dashboard_service = DashboardService::new(repository);

    AppState {
        directory_service,
        session_service,
        dashboard_service,
        frontend_url,
    }
}
