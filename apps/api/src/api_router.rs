use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use rolegate_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

use cors::build_cors_layer;

pub fn build_router(
    app_state: AppState,
    session_layer: SessionManagerLayer<MemoryStore>,
) -> Result<Router, AppError> {
    let cors_layer = build_cors_layer(&app_state.frontend_url)?;

    let protected_routes = Router::new()
        .route("/api/me", get(auth::me_handler))
        .route(
            "/api/dashboard/stats",
            get(handlers::dashboard::dashboard_stats_handler),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/roles",
            get(handlers::roles::list_roles_handler).post(handlers::roles::create_role_handler),
        )
        .route(
            "/api/roles/{role_id}",
            put(handlers::roles::update_role_handler).delete(handlers::roles::delete_role_handler),
        )
        .route(
            "/api/permissions",
            get(handlers::permissions::list_permissions_handler)
                .post(handlers::permissions::create_permission_handler),
        )
        .route(
            "/api/permissions/{permission_id}",
            put(handlers::permissions::update_permission_handler)
                .delete(handlers::permissions::delete_permission_handler),
        )
        .route(
            "/api/permission-templates",
            get(handlers::permissions::permission_templates_handler),
        )
        .route(
            "/api/role-permission-matrix",
            get(handlers::matrix::role_permission_matrix_handler),
        )
        .route(
            "/api/role-permissions",
            put(handlers::matrix::update_role_permissions_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/logout", post(auth::logout_handler))
        .route(
            "/api/navigation",
            get(handlers::access::navigation_handler),
        )
        .route(
            "/api/views/{view}/access",
            get(handlers::access::view_access_handler),
        )
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}
