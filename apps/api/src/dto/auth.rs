use fleetdesk_application::LoginSession;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::UserIdentityResponse;

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued by a successful login.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-response.ts"
)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// RFC 3339 expiry timestamp.
    pub expires_at: String,
    pub user: UserIdentityResponse,
}

impl From<LoginSession> for LoginResponse {
    fn from(value: LoginSession) -> Self {
        Self {
            token: value.token.token,
            token_type: "Bearer",
            expires_at: value.token.expires_at.to_rfc3339(),
            user: UserIdentityResponse::from(value.user),
        }
    }
}
