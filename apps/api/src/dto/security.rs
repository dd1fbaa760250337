use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Role with its default permission set.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub is_system: bool,
    pub permissions: Vec<String>,
}

/// Catalog entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub name: String,
    pub display_name: String,
    pub module: String,
    pub description: Option<String>,
}

/// Catalog entries of one module.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-group-response.ts"
)]
pub struct PermissionGroupResponse {
    pub module: String,
    pub permissions: Vec<PermissionResponse>,
}

/// One resolved catalog entry of a user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-breakdown-entry-response.ts"
)]
pub struct PermissionBreakdownEntryResponse {
    pub permission: PermissionResponse,
    pub role_default: bool,
    /// `null` when the role default applies.
    pub override_grant: Option<bool>,
    pub effective: bool,
}

/// Permission editor payload for one user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-permission-breakdown-response.ts"
)]
pub struct UserPermissionBreakdownResponse {
    pub user_id: String,
    pub role: String,
    pub permissions: Vec<PermissionBreakdownEntryResponse>,
}

/// Incoming payload for per-user overrides.
///
/// `true` grants, `false` revokes and `null` removes the override.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-overrides-request.ts"
)]
pub struct UpdateUserOverridesRequest {
    pub overrides: BTreeMap<String, Option<bool>>,
}

impl UpdateUserOverridesRequest {
    /// Flattens the payload into service changes.
    #[must_use]
    pub fn into_changes(self) -> Vec<(String, Option<bool>)> {
        self.overrides.into_iter().collect()
    }
}
