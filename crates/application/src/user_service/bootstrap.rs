use fleetdesk_core::NonEmptyString;
use fleetdesk_domain::{AuditAction, EmailAddress, validate_password};

use crate::AuditEvent;

use super::*;

impl UserService {
    /// Creates the platform super admin, or resets an existing one.
    pub async fn bootstrap_super_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> AppResult<UserId> {
        let email = EmailAddress::new(email)?;
        let name = NonEmptyString::new(name.trim())?;
        validate_password(password)?;

        if let Some(existing) = self.user_repository.find_by_email(email.as_str()).await?
            && !existing.identity().is_super_admin()
        {
            return Err(AppError::Conflict(format!(
                "'{}' already belongs to a company user",
                email.as_str()
            )));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user_id = self
            .user_repository
            .upsert_super_admin(email.as_str(), name.as_str(), password_hash.as_str())
            .await?;

        self.audit_repository
            .append_event(AuditEvent {
                company_id: None,
                actor_id: None,
                action: AuditAction::SuperAdminBootstrapped,
                resource_type: "user".to_owned(),
                resource_id: user_id.to_string(),
                detail: Some(format!("bootstrapped super admin '{}'", email.as_str())),
            })
            .await?;

        Ok(user_id)
    }
}
