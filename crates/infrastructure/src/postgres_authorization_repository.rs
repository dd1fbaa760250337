use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use fleetdesk_application::AuthorizationRepository;
use fleetdesk_core::{AppError, AppResult, UserId};
use fleetdesk_domain::{PermissionDefinition, PermissionModule, PermissionName};


/// PostgreSQL-backed repository for permission lookups.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    name: String,
    display_name: String,
    module: String,
    description: Option<String>,
}

impl TryFrom<PermissionRow> for PermissionDefinition {
    type Error = AppError;

    fn try_from(row: PermissionRow) -> Result<Self, Self::Error> {
        let module = PermissionModule::from_str(row.module.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "invalid stored module for permission '{}': {error}",
                row.name
            ))
        })?;

        Ok(Self {
            name: stored_permission(row.name)?,
            display_name: row.display_name,
            module,
            description: row.description,
        })
    }
}

#[derive(Debug, FromRow)]
struct OverrideRow {
    permission_name: String,
    granted: bool,
}

/// Parses a permission name read back from the database.
pub(crate) fn stored_permission(value: String) -> AppResult<PermissionName> {
    PermissionName::new(value.as_str()).map_err(|error| {
        AppError::Internal(format!("invalid stored permission '{value}': {error}"))
    })
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn list_permission_catalog(&self) -> AppResult<Vec<PermissionDefinition>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT name, display_name, module, description
            FROM permissions
            ORDER BY sort_order, name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list permission catalog: {error}"))
        })?;

        rows.into_iter().map(PermissionDefinition::try_from).collect()
    }

    async fn role_grants_permission(
        &self,
        role: &str,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM role_permissions
                WHERE role_name = $1 AND permission_name = $2
            )
            "#,
        )
        .bind(role)
        .bind(permission.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve role grant: {error}")))
    }

    async fn list_role_permissions(&self, role: &str) -> AppResult<BTreeSet<PermissionName>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission_name
            FROM role_permissions
            WHERE role_name = $1
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list role permissions: {error}")))?;

        names.into_iter().map(stored_permission).collect()
    }

    async fn find_user_override(
        &self,
        user_id: UserId,
        permission: &PermissionName,
    ) -> AppResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT granted
            FROM user_permission_overrides
            WHERE user_id = $1 AND permission_name = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(permission.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve user override: {error}")))
    }

    async fn list_user_overrides(
        &self,
        user_id: UserId,
    ) -> AppResult<BTreeMap<PermissionName, bool>> {
        let rows = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT permission_name, granted
            FROM user_permission_overrides
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list user overrides: {error}")))?;

        rows.into_iter()
            .map(|row| Ok((stored_permission(row.permission_name)?, row.granted)))
            .collect()
    }
}
