use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;

use crate::dto::{LoginRequest, LoginResponse};
use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::middleware::BearerToken;
use crate::state::AppState;

pub async fn login_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let session = state
        .user_service
        .login(payload.email.as_str(), payload.password.as_str())
        .await?;

    Ok(Json(LoginResponse::from(session)))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> ApiResult<StatusCode> {
    state.user_service.logout(token.as_str()).await?;
    Ok(StatusCode::NO_CONTENT)
}
