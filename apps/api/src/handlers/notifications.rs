use axum::Json;
use axum::extract::{Extension, State};
use fleetdesk_core::UserIdentity;
use uuid::Uuid;

use crate::dto::NotificationResponse;
use crate::error::ApiResult;
use crate::extract::ValidatedPath;
use crate::state::AppState;

pub async fn list_notifications_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_notifications(&user)
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(notifications))
}

pub async fn mark_notification_read_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    ValidatedPath(notification_id): ValidatedPath<Uuid>,
) -> ApiResult<Json<NotificationResponse>> {
    let notification = state
        .notification_service
        .mark_notification_read(&user, notification_id)
        .await?;

    Ok(Json(NotificationResponse::from(notification)))
}
