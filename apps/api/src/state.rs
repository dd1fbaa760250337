use fleetdesk_application::{
    AuthorizationService, CompanyService, NotificationService, SecurityAdminService, UserService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub authorization_service: AuthorizationService,
    pub security_admin_service: SecurityAdminService,
    pub company_service: CompanyService,
    pub notification_service: NotificationService,
    /// `None` when running over the in-memory store.
    pub postgres_pool: Option<PgPool>,
}
