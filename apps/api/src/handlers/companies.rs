use axum::Json;
use axum::extract::{Extension, State};
use fleetdesk_core::UserIdentity;

use crate::dto::CompanyResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_companies_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<CompanyResponse>>> {
    let companies = state
        .company_service
        .list_companies(&user)
        .await?
        .into_iter()
        .map(CompanyResponse::from)
        .collect();

    Ok(Json(companies))
}
