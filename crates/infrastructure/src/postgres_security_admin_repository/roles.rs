use super::*;

const ROLE_SELECT: &str = r#"
    SELECT
        roles.name,
        roles.display_name,
        roles.description,
        roles.is_system,
        grants.permission_name
    FROM roles
    LEFT JOIN role_permissions AS grants
        ON grants.role_name = roles.name
"#;

impl PostgresSecurityAdminRepository {
    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<RoleDefinition>> {
        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            "{ROLE_SELECT} ORDER BY roles.name, grants.permission_name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        aggregate_roles(rows)
    }

    pub(super) async fn find_role_impl(&self, role: &RoleName) -> AppResult<Option<RoleDefinition>> {
        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            "{ROLE_SELECT} WHERE roles.name = $1 ORDER BY grants.permission_name"
        ))
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role '{role}': {error}")))?;

        Ok(aggregate_roles(rows)?.into_iter().next())
    }

    pub(super) async fn replace_role_permissions_impl(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        // Serializes concurrent replacements of the same role.
        let locked = sqlx::query_scalar::<_, String>(
            r#"
            SELECT name
            FROM roles
            WHERE name = $1
            FOR UPDATE
            "#,
        )
        .bind(role.as_str())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to lock role '{role}': {error}")))?;

        if locked.is_none() {
            return Err(AppError::NotFound(format!("role '{role}' does not exist")));
        }

        sqlx::query("DELETE FROM role_permissions WHERE role_name = $1")
            .bind(role.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to clear role permissions: {error}"))
            })?;

        let names: Vec<String> = permissions
            .iter()
            .map(|permission| permission.as_str().to_owned())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_name, permission_name)
            SELECT $1, permission_name
            FROM UNNEST($2::TEXT[]) AS requested (permission_name)
            "#,
        )
        .bind(role.as_str())
        .bind(&names)
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_unknown_permission(error, "failed to persist role permissions"))?;

        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            "{ROLE_SELECT} WHERE roles.name = $1 ORDER BY grants.permission_name"
        ))
        .bind(role.as_str())
        .fetch_all(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to reload role '{role}': {error}")))?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        tracing::debug!(role = %role, permissions = names.len(), "replaced role permissions");

        aggregate_roles(rows)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("role '{role}' does not exist")))
    }
}

/// Maps foreign key violations on `permission_name` to `NotFound`.
pub(super) fn map_unknown_permission(error: sqlx::Error, context: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23503")
    {
        return AppError::NotFound("one or more permissions do not exist".to_owned());
    }

    AppError::Internal(format!("{context}: {error}"))
}
