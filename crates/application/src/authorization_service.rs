use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use fleetdesk_core::{AppResult, UserId};
use fleetdesk_domain::{PermissionDefinition, PermissionName};

mod permissions;


/// Repository port for permission lookups.
///
/// Lookups are evaluated per call; implementations must not cache grants
/// across requests.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Lists the full permission catalog sorted by module and name.
    async fn list_permission_catalog(&self) -> AppResult<Vec<PermissionDefinition>>;

    /// Returns whether `role` grants `permission` by default.
    async fn role_grants_permission(
        &self,
        role: &str,
        permission: &PermissionName,
    ) -> AppResult<bool>;

    /// Lists the default permission set of `role`. Unknown roles yield an empty set.
    async fn list_role_permissions(&self, role: &str) -> AppResult<BTreeSet<PermissionName>>;

    /// Finds the override of one permission for one user.
    async fn find_user_override(
        &self,
        user_id: UserId,
        permission: &PermissionName,
    ) -> AppResult<Option<bool>>;

    /// Lists every override of one user.
    async fn list_user_overrides(&self, user_id: UserId)
    -> AppResult<BTreeMap<PermissionName, bool>>;
}

/// One catalog permission resolved for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionBreakdownEntry {
    /// Catalog entry.
    pub definition: PermissionDefinition,
    /// Membership in the role default set.
    pub role_default: bool,
    /// Explicit override, if any.
    pub override_grant: Option<bool>,
    /// Final decision.
    pub effective: bool,
}

/// Application service resolving fine-grained permissions.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Returns the permission catalog.
    pub async fn permission_catalog(&self) -> AppResult<Vec<PermissionDefinition>> {
        self.repository.list_permission_catalog().await
    }
}
