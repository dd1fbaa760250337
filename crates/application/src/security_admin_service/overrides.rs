use fleetdesk_core::AccessTier;
use fleetdesk_domain::{AuditAction, NotificationKind};

use crate::AuditEvent;
use crate::security_admin_ports::{OverrideChange, UserPermissionBreakdown};

use super::*;

impl SecurityAdminService {
    /// Returns the permission breakdown of a user.
    ///
    /// Super admins may read any user, company admins only users of their
    /// own company. Other users are reported as missing.
    pub async fn user_permission_breakdown(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<UserPermissionBreakdown> {
        if !actor.tier().satisfies(AccessTier::CompanyAdmin) {
            return Err(AppError::Forbidden(format!(
                "user '{}' cannot inspect permissions of other users",
                actor.user_id()
            )));
        }

        let user = self.find_scoped_user(actor, user_id).await?.identity();
        self.breakdown_for(user).await
    }

    /// Upserts or removes overrides of one user in a single transaction.
    ///
    /// `None` removes the override. When a name appears twice the last
    /// change wins. An empty change set only returns the breakdown.
    pub async fn update_user_overrides(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        changes: &[(String, Option<bool>)],
    ) -> AppResult<UserPermissionBreakdown> {
        Self::require_super_admin(actor)?;

        let target = self.find_scoped_user(actor, user_id).await?;
        if target.identity().is_super_admin() {
            return Err(AppError::Validation(
                "super admins hold every permission and cannot carry overrides".to_owned(),
            ));
        }

        if changes.is_empty() {
            return self.breakdown_for(target.identity()).await;
        }

        let names = self
            .catalog_names(changes.iter().map(|(name, _)| name.as_str()))
            .await?;
        let collapsed: BTreeMap<PermissionName, Option<bool>> = changes
            .iter()
            .filter_map(|(name, granted)| {
                names
                    .get(name.as_str())
                    .map(|permission| (permission.clone(), *granted))
            })
            .collect();
        let changes: Vec<OverrideChange> = collapsed
            .into_iter()
            .map(|(permission, granted)| OverrideChange {
                permission,
                granted,
            })
            .collect();

        self.repository
            .apply_user_overrides(target.id, &changes)
            .await?;

        let summary: Vec<String> = changes
            .iter()
            .map(|change| match change.granted {
                Some(granted) => format!("{}={granted}", change.permission),
                None => format!("{}=default", change.permission),
            })
            .collect();
        self.audit_repository
            .append_event(AuditEvent {
                company_id: target.company_id,
                actor_id: Some(actor.user_id()),
                action: AuditAction::SecurityUserOverridesUpdated,
                resource_type: "user_permission_overrides".to_owned(),
                resource_id: target.id.to_string(),
                detail: Some(format!(
                    "updated overrides of '{}': {}",
                    target.email,
                    summary.join(", ")
                )),
            })
            .await?;

        if let Some(company_id) = target.company_id {
            self.notification_service
                .notify_company_admins(
                    company_id,
                    NotificationKind::UserPermissionsChanged,
                    "User permissions changed",
                    format!("Permissions of {} ({}) were updated.", target.name, target.email)
                        .as_str(),
                )
                .await?;
        }

        self.breakdown_for(target.identity()).await
    }

    async fn breakdown_for(&self, user: UserIdentity) -> AppResult<UserPermissionBreakdown> {
        let permissions = self.authorization_service.permission_breakdown(&user).await?;
        Ok(UserPermissionBreakdown { user, permissions })
    }
}
