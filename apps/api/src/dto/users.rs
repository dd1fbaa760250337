use fleetdesk_application::{CompanyRecord, UserRecord};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// User row shown in the admin user list.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company_id: Option<String>,
    pub is_active: bool,
}

impl From<UserRecord> for UserResponse {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            role: value.role,
            company_id: value.company_id.map(|company_id| company_id.to_string()),
            is_active: value.is_active,
        }
    }
}

/// Incoming payload toggling a user account.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-user-status-request.ts"
)]
pub struct UpdateUserStatusRequest {
    pub is_active: bool,
}

/// Tenant visible to the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/company-response.ts"
)]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl From<CompanyRecord> for CompanyResponse {
    fn from(value: CompanyRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            is_active: value.is_active,
        }
    }
}
