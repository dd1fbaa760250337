//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_store;
mod postgres_access_token_repository;
mod postgres_audit_repository;
mod postgres_authorization_repository;
mod postgres_company_repository;
mod postgres_notification_repository;
mod postgres_security_admin_repository;
mod postgres_user_repository;

#[cfg(test)]
mod postgres_test_support;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_store::{InMemoryStore, NewUserAccount};
pub use postgres_access_token_repository::PostgresAccessTokenRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_company_repository::PostgresCompanyRepository;
pub use postgres_notification_repository::PostgresNotificationRepository;
pub use postgres_security_admin_repository::PostgresSecurityAdminRepository;
pub use postgres_user_repository::PostgresUserRepository;
