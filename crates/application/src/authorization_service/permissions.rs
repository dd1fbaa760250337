use fleetdesk_core::{AppError, UserIdentity};
use fleetdesk_domain::{ResolutionContext, resolve_grant};

use super::*;

impl AuthorizationService {
    /// Returns whether the user currently holds the permission.
    ///
    /// Malformed or unknown names are never granted, except to super admins.
    pub async fn has_permission(&self, actor: &UserIdentity, permission: &str) -> AppResult<bool> {
        if actor.is_super_admin() {
            return Ok(true);
        }

        let Ok(permission) = PermissionName::new(permission) else {
            return Ok(false);
        };

        let override_grant = self
            .repository
            .find_user_override(actor.user_id(), &permission)
            .await?;
        if let Some(granted) = override_grant {
            return Ok(granted);
        }

        let role_default = self
            .repository
            .role_grants_permission(actor.role(), &permission)
            .await?;

        Ok(resolve_grant(false, None, role_default))
    }

    /// Ensures the user holds the permission.
    pub async fn require_permission(&self, actor: &UserIdentity, permission: &str) -> AppResult<()> {
        if self.has_permission(actor, permission).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' is missing permission '{permission}'",
            actor.user_id()
        )))
    }

    /// Returns the granted catalog permissions, sorted by name.
    pub async fn effective_permissions(&self, actor: &UserIdentity) -> AppResult<Vec<PermissionName>> {
        let catalog = self.repository.list_permission_catalog().await?;
        let (role_defaults, overrides) = self.load_layers(actor).await?;
        let context = ResolutionContext {
            is_super_admin: actor.is_super_admin(),
            role_defaults: &role_defaults,
            overrides: &overrides,
        };

        Ok(context
            .effective_set(catalog.iter().map(|definition| &definition.name))
            .into_iter()
            .collect())
    }

    /// Resolves every catalog permission for `subject`, in catalog order.
    pub async fn permission_breakdown(
        &self,
        subject: &UserIdentity,
    ) -> AppResult<Vec<PermissionBreakdownEntry>> {
        let catalog = self.repository.list_permission_catalog().await?;
        let (role_defaults, overrides) = self.load_layers(subject).await?;
        let context = ResolutionContext {
            is_super_admin: subject.is_super_admin(),
            role_defaults: &role_defaults,
            overrides: &overrides,
        };
        let rows = context.breakdown(catalog.iter().map(|definition| &definition.name));

        Ok(catalog
            .into_iter()
            .zip(rows)
            .map(|(definition, resolution)| PermissionBreakdownEntry {
                definition,
                role_default: resolution.role_default,
                override_grant: resolution.override_grant,
                effective: resolution.effective,
            })
            .collect())
    }

    async fn load_layers(
        &self,
        subject: &UserIdentity,
    ) -> AppResult<(BTreeSet<PermissionName>, BTreeMap<PermissionName, bool>)> {
        if subject.is_super_admin() {
            return Ok((BTreeSet::new(), BTreeMap::new()));
        }

        let role_defaults = self.repository.list_role_permissions(subject.role()).await?;
        let overrides = self
            .repository
            .list_user_overrides(subject.user_id())
            .await?;

        Ok((role_defaults, overrides))
    }
}
