//! Rolegate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use rolegate_application::PasswordHasher;
use rolegate_core::AppError;
use rolegate_infrastructure::{
    Argon2PasswordHasher, InMemoryDirectoryRepository, seed_demo_directory,
};
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let repository = Arc::new(InMemoryDirectoryRepository::new());
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    if let Some(password) = config.demo_admin_password.as_deref() {
        let password_hash = password_hasher.hash_password(password)?;
        seed_demo_directory(&repository, &password_hash).await?;
    }

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)));

    let app_state =
        api_services::build_app_state(repository, password_hasher, config.frontend_url.clone());
    let app = api_router::build_router(app_state, session_layer)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "rolegate-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
