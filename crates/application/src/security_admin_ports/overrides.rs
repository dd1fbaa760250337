use fleetdesk_core::UserIdentity;
use fleetdesk_domain::PermissionName;

use crate::PermissionBreakdownEntry;

/// One requested change to a user's overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideChange {
    /// Target permission.
    pub permission: PermissionName,
    /// `Some` upserts the override, `None` removes it and reverts to the role default.
    pub granted: Option<bool>,
}

/// Every catalog permission resolved for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPermissionBreakdown {
    /// The user the breakdown belongs to.
    pub user: UserIdentity,
    /// Catalog entries in module order.
    pub permissions: Vec<PermissionBreakdownEntry>,
}
