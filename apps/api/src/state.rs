use rolegate_application::{DashboardService, DirectoryService, SessionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub directory_service: DirectoryService,
    pub session_service: SessionService,
    pub dashboard_service: DashboardService,
    pub frontend_url: String,
}
