use fleetdesk_core::AccessTier;
use fleetdesk_domain::{AuditAction, NotificationKind};

use crate::AuditEvent;

use super::*;

fn require_company_admin(actor: &UserIdentity) -> AppResult<()> {
    if actor.tier().satisfies(AccessTier::CompanyAdmin) {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "user '{}' is not a company administrator",
        actor.user_id()
    )))
}

impl UserService {
    /// Lists users in the actor's tenant scope.
    pub async fn list_users(&self, actor: &UserIdentity) -> AppResult<Vec<UserRecord>> {
        require_company_admin(actor)?;
        self.user_repository.list_users(actor.tenant_scope()?).await
    }

    /// Enables or disables a user account.
    ///
    /// Disabling notifies the company admins of the user's company. Tokens of
    /// the account stay stored until the gate sees them: the next request gets
    /// `AccountDisabled` and revokes them all.
    pub async fn set_user_active(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        is_active: bool,
    ) -> AppResult<UserRecord> {
        require_company_admin(actor)?;

        let target = self.find_visible_user(actor, user_id).await?;

        if target.id == actor.user_id() {
            return Err(AppError::Validation(
                "users cannot change the status of their own account".to_owned(),
            ));
        }

        if target.identity().is_super_admin() && !actor.is_super_admin() {
            return Err(AppError::Forbidden(
                "only super admins can change the status of a super admin".to_owned(),
            ));
        }

        if target.is_active == is_active {
            return Ok(target);
        }

        self.user_repository.set_active(target.id, is_active).await?;

        let action = if is_active {
            AuditAction::UserActivated
        } else {
            if let Some(company_id) = target.company_id {
                self.notification_service
                    .notify_company_admins(
                        company_id,
                        NotificationKind::UserDeactivated,
                        "User deactivated",
                        format!("{} ({}) was deactivated.", target.name, target.email).as_str(),
                    )
                    .await?;
            }
            AuditAction::UserDeactivated
        };

        self.audit_repository
            .append_event(AuditEvent {
                company_id: target.company_id,
                actor_id: Some(actor.user_id()),
                action,
                resource_type: "user".to_owned(),
                resource_id: target.id.to_string(),
                detail: Some(format!(
                    "set is_active={is_active} for '{}'",
                    target.email
                )),
            })
            .await?;

        Ok(UserRecord { is_active, ..target })
    }
}
