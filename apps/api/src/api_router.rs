use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, patch, post, put};
use fleetdesk_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

#[cfg(test)]
mod tests;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let super_admin_routes = Router::new()
        .route(
            "/roles/{role}/permissions",
            put(handlers::security::replace_role_permissions_handler),
        )
        .route(
            "/users/{user_id}/permissions",
            put(handlers::security::update_user_permissions_handler),
        )
        .route_layer(from_fn(middleware::require_super_admin));

    let company_admin_routes = Router::new()
        .route("/users", get(handlers::users::list_users_handler))
        .route(
            "/users/{user_id}/status",
            patch(handlers::users::update_user_status_handler),
        )
        .route(
            "/users/{user_id}/permissions",
            get(handlers::security::user_permissions_handler),
        )
        .route_layer(from_fn(middleware::require_company_admin));

    let protected_routes = Router::new()
        .route("/auth/logout", post(handlers::auth::logout_handler))
        .route("/me", get(handlers::me::me_handler))
        .route("/me/permissions", get(handlers::me::my_permissions_handler))
        .route("/roles", get(handlers::security::list_roles_handler))
        .route("/roles/{role}", get(handlers::security::role_handler))
        .route(
            "/permissions",
            get(handlers::security::list_permissions_handler),
        )
        .route(
            "/companies",
            get(handlers::companies::list_companies_handler),
        )
        .route(
            "/notifications",
            get(handlers::notifications::list_notifications_handler),
        )
        .route(
            "/notifications/{notification_id}/read",
            post(handlers::notifications::mark_notification_read_handler),
        )
        .merge(super_admin_routes)
        .merge(company_admin_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/login", post(handlers::auth::login_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
