use super::*;

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .security_admin_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn role_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state.security_admin_service.find_role(role.as_str()).await?;
    Ok(Json(RoleResponse::from(role)))
}

pub async fn replace_role_permissions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(role): Path<String>,
    ValidatedJson(permissions): ValidatedJson<Vec<String>>,
) -> ApiResult<Json<RoleResponse>> {
    let role = state
        .security_admin_service
        .replace_role_permissions(&user, role.as_str(), &permissions)
        .await?;

    Ok(Json(RoleResponse::from(role)))
}

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionGroupResponse>>> {
    let groups = state
        .security_admin_service
        .list_permission_catalog()
        .await?
        .into_iter()
        .map(PermissionGroupResponse::from)
        .collect();

    Ok(Json(groups))
}
