use fleetdesk_application::{PermissionBreakdownEntry, UserPermissionBreakdown};
use fleetdesk_domain::{PermissionDefinition, PermissionGroup, PermissionName, RoleDefinition};

use super::{
    PermissionBreakdownEntryResponse, PermissionGroupResponse, PermissionResponse, RoleResponse,
    UserPermissionBreakdownResponse,
};

impl From<RoleDefinition> for RoleResponse {
    fn from(value: RoleDefinition) -> Self {
        Self {
            name: value.name.to_string(),
            display_name: value.display_name,
            description: value.description,
            is_system: value.is_system,
            permissions: value
                .permissions
                .iter()
                .map(PermissionName::as_str)
                .map(ToOwned::to_owned)
                .collect(),
        }
    }
}

impl From<PermissionDefinition> for PermissionResponse {
    fn from(value: PermissionDefinition) -> Self {
        Self {
            name: value.name.to_string(),
            display_name: value.display_name,
            module: value.module.as_str().to_owned(),
            description: value.description,
        }
    }
}

impl From<PermissionGroup> for PermissionGroupResponse {
    fn from(value: PermissionGroup) -> Self {
        Self {
            module: value.module.as_str().to_owned(),
            permissions: value
                .permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
        }
    }
}

impl From<PermissionBreakdownEntry> for PermissionBreakdownEntryResponse {
    fn from(value: PermissionBreakdownEntry) -> Self {
        Self {
            permission: PermissionResponse::from(value.definition),
            role_default: value.role_default,
            override_grant: value.override_grant,
            effective: value.effective,
        }
    }
}

impl From<UserPermissionBreakdown> for UserPermissionBreakdownResponse {
    fn from(value: UserPermissionBreakdown) -> Self {
        Self {
            user_id: value.user.user_id().to_string(),
            role: value.user.role().to_owned(),
            permissions: value
                .permissions
                .into_iter()
                .map(PermissionBreakdownEntryResponse::from)
                .collect(),
        }
    }
}
