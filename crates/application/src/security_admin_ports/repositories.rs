use std::collections::BTreeSet;

use async_trait::async_trait;

use fleetdesk_core::{AppResult, UserId};
use fleetdesk_domain::{PermissionName, RoleDefinition, RoleName};

use super::overrides::OverrideChange;

/// Repository port for role defaults and user overrides administration.
#[async_trait]
pub trait SecurityAdminRepository: Send + Sync {
    /// Lists every role with its default set, ordered by name.
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>>;

    /// Finds one role.
    async fn find_role(&self, role: &RoleName) -> AppResult<Option<RoleDefinition>>;

    /// Replaces the role's default set with exactly `permissions`.
    ///
    /// Must run atomically: readers see either the old or the new set.
    async fn replace_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition>;

    /// Applies override upserts and removals for one user atomically.
    async fn apply_user_overrides(
        &self,
        user_id: UserId,
        changes: &[OverrideChange],
    ) -> AppResult<()>;
}
