use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use fleetdesk_core::{AppError, AppResult, UserId, UserIdentity};
use fleetdesk_domain::{PermissionDefinition, PermissionName};

use crate::{AuditRepository, AuthorizationService, NotificationService, UserRecord, UserRepository};
use crate::security_admin_ports::SecurityAdminRepository;

mod overrides;
mod roles;


/// Application service for role and override administration.
#[derive(Clone)]
pub struct SecurityAdminService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn SecurityAdminRepository>,
    user_repository: Arc<dyn UserRepository>,
    notification_service: NotificationService,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SecurityAdminService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn SecurityAdminRepository>,
        user_repository: Arc<dyn UserRepository>,
        notification_service: NotificationService,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            user_repository,
            notification_service,
            audit_repository,
        }
    }

    fn require_super_admin(actor: &UserIdentity) -> AppResult<()> {
        if actor.is_super_admin() {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' is not allowed to manage permissions",
            actor.user_id()
        )))
    }

    /// Parses requested names against the catalog. Unknown names are `NotFound`.
    async fn catalog_names<'a>(
        &self,
        requested: impl IntoIterator<Item = &'a str>,
    ) -> AppResult<BTreeMap<&'a str, PermissionName>> {
        let catalog: BTreeSet<PermissionName> = self
            .authorization_service
            .permission_catalog()
            .await?
            .into_iter()
            .map(|definition: PermissionDefinition| definition.name)
            .collect();

        requested
            .into_iter()
            .map(|value| {
                PermissionName::new(value)
                    .ok()
                    .filter(|name| catalog.contains(name))
                    .map(|name| (value, name))
                    .ok_or_else(|| AppError::NotFound(format!("permission '{value}' does not exist")))
            })
            .collect()
    }

    async fn find_scoped_user(&self, actor: &UserIdentity, user_id: UserId) -> AppResult<UserRecord> {
        let scope = actor.tenant_scope()?;
        self.user_repository
            .find_by_id(user_id)
            .await?
            .filter(|user| scope.allows(user.company_id))
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }
}
