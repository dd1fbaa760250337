use fleetdesk_core::SUPER_ADMIN_ROLE;

use super::*;

impl PostgresUserRepository {
    pub(super) async fn set_active_impl(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET is_active = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(is_active)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update user status: {error}")))?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        Ok(())
    }

    /// Only rows already holding the super admin role are updated on conflict,
    /// so a company account with the same email is never promoted.
    pub(super) async fn upsert_super_admin_impl(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<UserId> {
        let id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO users (id, company_id, name, email, password_hash, role)
            VALUES ($1, NULL, $2, LOWER($3), $4, $5)
            ON CONFLICT ((LOWER(email))) DO UPDATE
                SET name = EXCLUDED.name,
                    password_hash = EXCLUDED.password_hash,
                    is_active = TRUE,
                    updated_at = now()
                WHERE users.role = $5
            RETURNING id
            "#,
        )
        .bind(UserId::new().as_uuid())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(SUPER_ADMIN_ROLE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to upsert super admin: {error}")))?
        .ok_or_else(|| {
            AppError::Conflict(format!(
                "email '{email}' already belongs to a company account"
            ))
        })?;

        Ok(UserId::from_uuid(id))
    }
}
