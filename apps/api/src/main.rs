//! FleetDesk access control API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use fleetdesk_core::AppError;
use tracing::info;

use crate::api_config::{ApiCommand, ApiConfig, SuperAdminBootstrapConfig, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{build_app_state, connect, postgres_ports, run_migrations};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = connect(&config.database_url, config.database_max_connections).await?;
    run_migrations(&pool).await?;

    if config.command == ApiCommand::Migrate {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let app_state = build_app_state(
        postgres_ports(&pool),
        config.access_token_ttl,
        Some(pool.clone()),
    );

    if config.command == ApiCommand::BootstrapSuperAdmin {
        let bootstrap = SuperAdminBootstrapConfig::load()?;
        let user_id = app_state
            .user_service
            .bootstrap_super_admin(
                bootstrap.email.as_str(),
                bootstrap.name.as_str(),
                bootstrap.password.as_str(),
            )
            .await?;

        info!(%user_id, email = %bootstrap.email, "super admin is ready");
        return Ok(());
    }

    let app = build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "fleetdesk api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("API server failed: {error}")))
}
