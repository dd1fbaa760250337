use std::sync::Arc;

use fleetdesk_infrastructure::{
    Argon2PasswordHasher, PostgresAccessTokenRepository, PostgresAuditRepository,
    PostgresAuthorizationRepository, PostgresCompanyRepository, PostgresNotificationRepository,
    PostgresSecurityAdminRepository, PostgresUserRepository,
};
use sqlx::PgPool;

use super::ServicePorts;

pub fn postgres_ports(pool: &PgPool) -> ServicePorts {
    ServicePorts {
        user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        access_token_repository: Arc::new(PostgresAccessTokenRepository::new(pool.clone())),
        authorization_repository: Arc::new(PostgresAuthorizationRepository::new(pool.clone())),
        security_admin_repository: Arc::new(PostgresSecurityAdminRepository::new(pool.clone())),
        company_repository: Arc::new(PostgresCompanyRepository::new(pool.clone())),
        notification_repository: Arc::new(PostgresNotificationRepository::new(pool.clone())),
        audit_repository: Arc::new(PostgresAuditRepository::new(pool.clone())),
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
    }
}

#[cfg(test)]
pub fn in_memory_ports(store: &Arc<fleetdesk_infrastructure::InMemoryStore>) -> ServicePorts {
    ServicePorts {
        user_repository: store.clone(),
        access_token_repository: store.clone(),
        authorization_repository: store.clone(),
        security_admin_repository: store.clone(),
        company_repository: store.clone(),
        notification_repository: store.clone(),
        audit_repository: store.clone(),
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
    }
}
