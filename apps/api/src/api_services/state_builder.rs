use std::sync::Arc;

use fleetdesk_application::{
    AccessTokenRepository, AccessTokenService, AuditRepository, AuthorizationRepository,
    AuthorizationService, CompanyRepository, CompanyService, NotificationRepository,
    NotificationService, PasswordHasher, SecurityAdminRepository, SecurityAdminService,
    UserRepository, UserService,
};
use sqlx::PgPool;

use crate::state::AppState;

mod repositories;

#[cfg(test)]
pub use repositories::in_memory_ports;
pub use repositories::postgres_ports;

/// Every port the services are wired from.
#[derive(Clone)]
pub struct ServicePorts {
    pub user_repository: Arc<dyn UserRepository>,
    pub access_token_repository: Arc<dyn AccessTokenRepository>,
    pub authorization_repository: Arc<dyn AuthorizationRepository>,
    pub security_admin_repository: Arc<dyn SecurityAdminRepository>,
    pub company_repository: Arc<dyn CompanyRepository>,
    pub notification_repository: Arc<dyn NotificationRepository>,
    pub audit_repository: Arc<dyn AuditRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
}

pub fn build_app_state(
    ports: ServicePorts,
    access_token_ttl: chrono::Duration,
    postgres_pool: Option<PgPool>,
) -> AppState {
    let authorization_service = AuthorizationService::new(ports.authorization_repository);
    let notification_service = NotificationService::new(ports.notification_repository);
    let access_token_service =
        AccessTokenService::new(ports.access_token_repository, access_token_ttl);

    let user_service = UserService::new(
        ports.user_repository.clone(),
        ports.password_hasher,
        access_token_service,
        notification_service.clone(),
        ports.audit_repository.clone(),
    );
    let security_admin_service = SecurityAdminService::new(
        authorization_service.clone(),
        ports.security_admin_repository,
        ports.user_repository,
        notification_service.clone(),
        ports.audit_repository,
    );

    AppState {
        user_service,
        authorization_service,
        security_admin_service,
        company_service: CompanyService::new(ports.company_repository),
        notification_service,
        postgres_pool,
    }
}
