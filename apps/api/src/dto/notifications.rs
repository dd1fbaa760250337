use fleetdesk_application::NotificationRecord;
use serde::Serialize;
use ts_rs::TS;

/// In-app notification of the caller.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/notification-response.ts"
)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub read_at: Option<String>,
    pub created_at: String,
}

impl From<NotificationRecord> for NotificationResponse {
    fn from(value: NotificationRecord) -> Self {
        Self {
            id: value.id.to_string(),
            kind: value.kind.as_str().to_owned(),
            title: value.title,
            message: value.message,
            read_at: value.read_at.map(|read_at| read_at.to_rfc3339()),
            created_at: value.created_at.to_rfc3339(),
        }
    }
}
