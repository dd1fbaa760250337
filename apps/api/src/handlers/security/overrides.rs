use super::*;

pub async fn user_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
) -> ApiResult<Json<UserPermissionBreakdownResponse>> {
    let breakdown = state
        .security_admin_service
        .user_permission_breakdown(&user, UserId::from_uuid(user_id))
        .await?;

    Ok(Json(UserPermissionBreakdownResponse::from(breakdown)))
}

pub async fn update_user_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ValidatedPath(user_id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserOverridesRequest>,
) -> ApiResult<Json<UserPermissionBreakdownResponse>> {
    let breakdown = state
        .security_admin_service
        .update_user_overrides(&user, UserId::from_uuid(user_id), &payload.into_changes())
        .await?;

    Ok(Json(UserPermissionBreakdownResponse::from(breakdown)))
}
