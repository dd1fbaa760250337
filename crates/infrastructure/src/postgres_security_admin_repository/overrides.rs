use super::roles::map_unknown_permission;
use super::*;

impl PostgresSecurityAdminRepository {
    pub(super) async fn apply_user_overrides_impl(
        &self,
        user_id: UserId,
        changes: &[OverrideChange],
    ) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        for change in changes {
            match change.granted {
                Some(granted) => {
                    sqlx::query(
                        r#"
                        INSERT INTO user_permission_overrides (user_id, permission_name, granted)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (user_id, permission_name)
                        DO UPDATE SET granted = EXCLUDED.granted, updated_at = now()
                        "#,
                    )
                    .bind(user_id.as_uuid())
                    .bind(change.permission.as_str())
                    .bind(granted)
                    .execute(&mut *transaction)
                    .await
                    .map_err(|error| {
                        map_unknown_permission(error, "failed to upsert user override")
                    })?;
                }
                None => {
                    sqlx::query(
                        r#"
                        DELETE FROM user_permission_overrides
                        WHERE user_id = $1 AND permission_name = $2
                        "#,
                    )
                    .bind(user_id.as_uuid())
                    .bind(change.permission.as_str())
                    .execute(&mut *transaction)
                    .await
                    .map_err(|error| {
                        AppError::Internal(format!("failed to remove user override: {error}"))
                    })?;
                }
            }
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        tracing::debug!(user_id = %user_id, changes = changes.len(), "applied user overrides");
        Ok(())
    }
}
