use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use fleetdesk_core::{AccessTier, AppError, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Raw bearer token of the current request, kept for logout.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(&request)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    let identity = match state.user_service.authenticate(token.as_str()).await {
        Ok(identity) => identity,
        Err(error @ AppError::AccountDisabled(_)) => {
            tracing::warn!(%error, "rejected request from disabled account");
            return Err(error.into());
        }
        Err(error) => return Err(error.into()),
    };

    request.extensions_mut().insert(identity);
    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}

pub async fn require_company_admin(request: Request, next: Next) -> ApiResult<Response> {
    require_tier(&request, AccessTier::CompanyAdmin)?;
    Ok(next.run(request).await)
}

pub async fn require_super_admin(request: Request, next: Next) -> ApiResult<Response> {
    require_tier(&request, AccessTier::SuperAdmin)?;
    Ok(next.run(request).await)
}

fn require_tier(request: &Request, required: AccessTier) -> Result<(), AppError> {
    let identity = request
        .extensions()
        .get::<UserIdentity>()
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    if identity.tier().satisfies(required) {
        return Ok(());
    }

    Err(AppError::Forbidden(format!(
        "route requires the {} tier",
        required.as_str()
    )))
}

fn bearer_token(request: &Request) -> Option<String> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .trim();
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_owned())
}
