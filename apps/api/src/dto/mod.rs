mod auth;
mod common;
mod notifications;
mod security;
mod users;

pub use auth::{LoginRequest, LoginResponse};
pub use common::{HealthDependencyStatus, HealthResponse, UserIdentityResponse};
pub use notifications::NotificationResponse;
pub use security::{
    PermissionGroupResponse, RoleResponse, UpdateUserOverridesRequest,
    UserPermissionBreakdownResponse,
};
pub use users::{CompanyResponse, UpdateUserStatusRequest, UserResponse};
