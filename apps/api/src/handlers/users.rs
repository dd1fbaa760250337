use axum::Json;
use axum::extract::{Extension, State};
use fleetdesk_core::{UserId, UserIdentity};
use uuid::Uuid;

use crate::dto::{UpdateUserStatusRequest, UserResponse};
use crate::error::ApiResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&user)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

/// Enables or disables an account. Disabling revokes its tokens.
pub async fn update_user_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserStatusRequest>,
) -> ApiResult<Json<UserResponse>> {
    let updated = state
        .user_service
        .set_user_active(&user, UserId::from_uuid(user_id), payload.is_active)
        .await?;

    Ok(Json(UserResponse::from(updated)))
}
