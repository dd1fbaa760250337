use axum::Json;
use axum::extract::{Extension, Path, State};
use fleetdesk_core::{UserId, UserIdentity};
use uuid::Uuid;

use crate::dto::{
    PermissionGroupResponse, RoleResponse, UpdateUserOverridesRequest,
    UserPermissionBreakdownResponse,
};
use crate::error::ApiResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::state::AppState;

mod overrides;
mod roles;

pub use overrides::{update_user_permissions_handler, user_permissions_handler};
pub use roles::{
    list_permissions_handler, list_roles_handler, replace_role_permissions_handler, role_handler,
};
