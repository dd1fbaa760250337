use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a role's default permission set is replaced.
    SecurityRolePermissionsReplaced,
    /// Emitted when per-user permission overrides change.
    SecurityUserOverridesUpdated,
    /// Emitted when a user account is re-enabled.
    UserActivated,
    /// Emitted when a user account is disabled.
    UserDeactivated,
    /// Emitted when the super admin account is created or reset.
    SuperAdminBootstrapped,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityRolePermissionsReplaced => "security.role.permissions_replaced",
            Self::SecurityUserOverridesUpdated => "security.user.overrides_updated",
            Self::UserActivated => "user.activated",
            Self::UserDeactivated => "user.deactivated",
            Self::SuperAdminBootstrapped => "user.super_admin_bootstrapped",
        }
    }
}
