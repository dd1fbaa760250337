use fleetdesk_domain::{AuditAction, PermissionGroup, RoleDefinition, RoleName, group_by_module};

use crate::AuditEvent;

use super::*;

fn parse_role_name(role: &str) -> AppResult<RoleName> {
    RoleName::new(role).map_err(|_| AppError::NotFound(format!("role '{role}' does not exist")))
}

impl SecurityAdminService {
    /// Lists every role with its default permission set.
    pub async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.repository.list_roles().await
    }

    /// Returns one role.
    pub async fn find_role(&self, role: &str) -> AppResult<RoleDefinition> {
        let name = parse_role_name(role)?;
        self.repository
            .find_role(&name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role}' does not exist")))
    }

    /// Returns the permission catalog grouped by module.
    pub async fn list_permission_catalog(&self) -> AppResult<Vec<PermissionGroup>> {
        Ok(group_by_module(
            self.authorization_service.permission_catalog().await?,
        ))
    }

    /// Replaces a role's default permission set and emits an audit event.
    ///
    /// Duplicate names collapse. System roles are rejected and keep their set.
    pub async fn replace_role_permissions(
        &self,
        actor: &UserIdentity,
        role: &str,
        permissions: &[String],
    ) -> AppResult<RoleDefinition> {
        Self::require_super_admin(actor)?;

        let existing = self.find_role(role).await?;
        existing.ensure_editable()?;

        let requested: BTreeSet<PermissionName> = self
            .catalog_names(permissions.iter().map(String::as_str))
            .await?
            .into_values()
            .collect();

        let updated = self
            .repository
            .replace_role_permissions(&existing.name, &requested)
            .await?;

        let names: Vec<&str> = updated.permissions.iter().map(PermissionName::as_str).collect();
        self.audit_repository
            .append_event(AuditEvent {
                company_id: None,
                actor_id: Some(actor.user_id()),
                action: AuditAction::SecurityRolePermissionsReplaced,
                resource_type: "role".to_owned(),
                resource_id: updated.name.to_string(),
                detail: Some(format!(
                    "replaced defaults of role '{}' with [{}]",
                    updated.name,
                    names.join(", ")
                )),
            })
            .await?;

        Ok(updated)
    }
}
