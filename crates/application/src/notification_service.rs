//! In-app notifications for company administrators.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fleetdesk_core::{AppError, AppResult, CompanyId, UserId, UserIdentity};
use fleetdesk_domain::NotificationKind;
use uuid::Uuid;

/// Stored notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    /// Notification identifier.
    pub id: Uuid,
    /// Recipient.
    pub user_id: UserId,
    /// Company the event happened in.
    pub company_id: CompanyId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// When the recipient marked it read.
    pub read_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Notification to insert for one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Company the event happened in.
    pub company_id: CompanyId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
}

/// Repository port for notifications.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Lists active users of `company_id` holding the company admin role.
    async fn list_company_admin_recipients(&self, company_id: CompanyId) -> AppResult<Vec<UserId>>;

    /// Inserts notifications, one row per entry.
    async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> AppResult<()>;

    /// Lists notifications owned by `user_id`, newest first.
    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<NotificationRecord>>;

    /// Marks one notification read when owned by `user_id`.
    ///
    /// Returns `None` when no such notification belongs to the user.
    async fn mark_read(
        &self,
        user_id: UserId,
        notification_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<NotificationRecord>>;
}

/// Application service for notification fan-out and inbox reads.
#[derive(Clone)]
pub struct NotificationService {
    repository: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Creates a notification service.
    #[must_use]
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Notifies every active company admin of `company_id`.
    ///
    /// Recipients are resolved when the event happens. Returns the number of
    /// notifications written.
    pub async fn notify_company_admins(
        &self,
        company_id: CompanyId,
        kind: NotificationKind,
        title: &str,
        message: &str,
    ) -> AppResult<usize> {
        let recipients = self
            .repository
            .list_company_admin_recipients(company_id)
            .await?;
        let count = recipients.len();
        if count == 0 {
            return Ok(0);
        }

        let notifications = recipients
            .into_iter()
            .map(|user_id| NewNotification {
                user_id,
                company_id,
                kind,
                title: title.to_owned(),
                message: message.to_owned(),
            })
            .collect();
        self.repository.insert_notifications(notifications).await?;

        Ok(count)
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list_notifications(&self, actor: &UserIdentity) -> AppResult<Vec<NotificationRecord>> {
        self.repository.list_for_user(actor.user_id()).await
    }

    /// Marks one of the caller's notifications read.
    pub async fn mark_notification_read(
        &self,
        actor: &UserIdentity,
        notification_id: Uuid,
    ) -> AppResult<NotificationRecord> {
        self.repository
            .mark_read(actor.user_id(), notification_id, Utc::now())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("notification '{notification_id}' does not exist"))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use fleetdesk_core::{AppError, AppResult, CompanyId, UserId, UserIdentity};
    use fleetdesk_domain::NotificationKind;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use super::{NewNotification, NotificationRecord, NotificationRepository, NotificationService};

    #[derive(Default)]
    struct FakeNotificationRepository {
        admins: Vec<(CompanyId, UserId)>,
        rows: Mutex<Vec<NotificationRecord>>,
    }

    #[async_trait]
    impl NotificationRepository for FakeNotificationRepository {
        async fn list_company_admin_recipients(
            &self,
            company_id: CompanyId,
        ) -> AppResult<Vec<UserId>> {
            Ok(self
                .admins
                .iter()
                .filter(|(company, _)| *company == company_id)
                .map(|(_, user_id)| *user_id)
                .collect())
        }

        async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> AppResult<()> {
            let mut rows = self.rows.lock().await;
            for notification in notifications {
                rows.push(NotificationRecord {
                    id: Uuid::new_v4(),
                    user_id: notification.user_id,
                    company_id: notification.company_id,
                    kind: notification.kind,
                    title: notification.title,
                    message: notification.message,
                    read_at: None,
                    created_at: Utc::now(),
                });
            }
            Ok(())
        }

        async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<NotificationRecord>> {
            Ok(self
                .rows
                .lock()
                .await
                .iter()
                .filter(|row| row.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn mark_read(
            &self,
            user_id: UserId,
            notification_id: Uuid,
            read_at: DateTime<Utc>,
        ) -> AppResult<Option<NotificationRecord>> {
            let mut rows = self.rows.lock().await;
            Ok(rows
                .iter_mut()
                .find(|row| row.id == notification_id && row.user_id == user_id)
                .map(|row| {
                    row.read_at = Some(read_at);
                    row.clone()
                }))
        }
    }

    fn admin(company_id: CompanyId, user_id: UserId) -> UserIdentity {
        UserIdentity::new(user_id, "Ada", "ada@fleet.test", "company_admin", Some(company_id))
    }

    #[tokio::test]
    async fn fan_out_reaches_only_admins_of_the_company() {
        let company = CompanyId::new();
        let first = UserId::new();
        let second = UserId::new();
        let outsider = UserId::new();
        let service = NotificationService::new(Arc::new(FakeNotificationRepository {
            admins: vec![(company, first), (company, second), (CompanyId::new(), outsider)],
            rows: Mutex::new(Vec::new()),
        }));

        let written = service
            .notify_company_admins(company, NotificationKind::UserDeactivated, "Disabled", "user disabled")
            .await;
        assert_eq!(written.ok(), Some(2));

        let inbox = service
            .list_notifications(&admin(company, first))
            .await
            .unwrap_or_default();
        assert_eq!(inbox.len(), 1);
        assert!(
            service
                .list_notifications(&admin(company, outsider))
                .await
                .unwrap_or_default()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn only_the_owner_can_mark_read() {
        let company = CompanyId::new();
        let owner = UserId::new();
        let service = NotificationService::new(Arc::new(FakeNotificationRepository {
            admins: vec![(company, owner)],
            rows: Mutex::new(Vec::new()),
        }));
        let _ = service
            .notify_company_admins(company, NotificationKind::UserPermissionsChanged, "Changed", "overrides changed")
            .await;
        let inbox = service
            .list_notifications(&admin(company, owner))
            .await
            .unwrap_or_default();
        let notification_id = inbox[0].id;

        let stranger = admin(company, UserId::new());
        assert!(matches!(
            service.mark_notification_read(&stranger, notification_id).await,
            Err(AppError::NotFound(_))
        ));

        let read = service
            .mark_notification_read(&admin(company, owner), notification_id)
            .await;
        assert!(read.is_ok_and(|row| row.read_at.is_some()));
    }
}
