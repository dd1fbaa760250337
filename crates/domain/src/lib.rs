//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod notification;
mod permission;
mod resolution;
mod role;
mod security;
mod user;

pub use notification::NotificationKind;
pub use permission::{
    MAX_NAME_LENGTH, PermissionDefinition, PermissionGroup, PermissionModule, PermissionName,
    group_by_module,
};
pub use resolution::{PermissionResolution, ResolutionContext, resolve_grant};
pub use role::{RoleDefinition, RoleName};
pub use security::AuditAction;
pub use user::{EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, validate_password};
