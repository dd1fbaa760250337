//! Application services and ports.

#![forbid(unsafe_code)]

mod access_token_service;
mod audit_ports;
mod authorization_service;
mod company_service;
mod notification_service;
mod security_admin_ports;
mod security_admin_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use access_token_service::{
    AccessTokenRecord, AccessTokenRepository, AccessTokenService, IssuedAccessToken, hash_token,
};
pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::{
    AuthorizationRepository, AuthorizationService, PermissionBreakdownEntry,
};
pub use company_service::{CompanyRecord, CompanyRepository, CompanyService};
pub use notification_service::{
    NewNotification, NotificationRecord, NotificationRepository, NotificationService,
};
pub use security_admin_ports::{OverrideChange, SecurityAdminRepository, UserPermissionBreakdown};
pub use security_admin_service::SecurityAdminService;
pub use user_service::{LoginSession, PasswordHasher, UserRecord, UserRepository, UserService};
