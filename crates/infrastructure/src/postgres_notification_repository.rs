//! PostgreSQL-backed notification inbox.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use fleetdesk_application::{NewNotification, NotificationRecord, NotificationRepository};
use fleetdesk_core::{AppError, AppResult, COMPANY_ADMIN_ROLE, CompanyId, UserId};
use fleetdesk_domain::NotificationKind;


/// PostgreSQL implementation of the notification repository port.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: Uuid,
    company_id: Uuid,
    kind: String,
    title: String,
    message: String,
    read_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for NotificationRecord {
    type Error = AppError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::from_str(row.kind.as_str()).map_err(|error| {
            AppError::Internal(format!("invalid stored notification '{}': {error}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            company_id: CompanyId::from_uuid(row.company_id),
            kind,
            title: row.title,
            message: row.message,
            read_at: row.read_at,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn list_company_admin_recipients(&self, company_id: CompanyId) -> AppResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
            FROM users
            WHERE company_id = $1 AND role = $2 AND is_active
            ORDER BY id
            "#,
        )
        .bind(company_id.as_uuid())
        .bind(COMPANY_ADMIN_ROLE)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list notification recipients: {error}"))
        })?;

        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        for notification in &notifications {
            sqlx::query(
                r#"
                INSERT INTO notifications (user_id, company_id, kind, title, message)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(notification.user_id.as_uuid())
            .bind(notification.company_id.as_uuid())
            .bind(notification.kind.as_str())
            .bind(notification.title.as_str())
            .bind(notification.message.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| AppError::Internal(format!("failed to insert notification: {error}")))?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<NotificationRecord>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, user_id, company_id, kind, title, message, read_at, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list notifications: {error}")))?;

        rows.into_iter().map(NotificationRecord::try_from).collect()
    }

    async fn mark_read(
        &self,
        user_id: UserId,
        notification_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<NotificationRecord>> {
        // Keeps the first read timestamp when marked twice.
        let row = sqlx::query_as::<_, NotificationRow>(
            r#"
            UPDATE notifications
            SET read_at = COALESCE(read_at, $3)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, company_id, kind, title, message, read_at, created_at
            "#,
        )
        .bind(notification_id)
        .bind(user_id.as_uuid())
        .bind(read_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to mark notification read: {error}"))
        })?;

        row.map(NotificationRecord::try_from).transpose()
    }
}
