use axum::Json;
use axum::extract::{Extension, State};
use fleetdesk_core::UserIdentity;
use fleetdesk_domain::PermissionName;

use crate::dto::UserIdentityResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn me_handler(Extension(user): Extension<UserIdentity>) -> Json<UserIdentityResponse> {
    Json(UserIdentityResponse::from(user))
}

/// Effective permission names of the caller, sorted.
pub async fn my_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<String>>> {
    let permissions = state
        .authorization_service
        .effective_permissions(&user)
        .await?
        .iter()
        .map(PermissionName::as_str)
        .map(ToOwned::to_owned)
        .collect();

    Ok(Json(permissions))
}
