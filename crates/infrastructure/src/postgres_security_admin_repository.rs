use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use fleetdesk_application::{OverrideChange, SecurityAdminRepository};
use fleetdesk_core::{AppError, AppResult, UserId};
use fleetdesk_domain::{PermissionName, RoleDefinition, RoleName};

use crate::postgres_authorization_repository::stored_permission;

mod overrides;
mod roles;


/// PostgreSQL-backed repository for role defaults and user overrides.
#[derive(Clone)]
pub struct PostgresSecurityAdminRepository {
    pool: PgPool,
}

impl PostgresSecurityAdminRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    name: String,
    display_name: String,
    description: Option<String>,
    is_system: bool,
    permission_name: Option<String>,
}

#[async_trait]
impl SecurityAdminRepository for PostgresSecurityAdminRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.list_roles_impl().await
    }

    async fn find_role(&self, role: &RoleName) -> AppResult<Option<RoleDefinition>> {
        self.find_role_impl(role).await
    }

    async fn replace_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        self.replace_role_permissions_impl(role, permissions).await
    }

    async fn apply_user_overrides(
        &self,
        user_id: UserId,
        changes: &[OverrideChange],
    ) -> AppResult<()> {
        self.apply_user_overrides_impl(user_id, changes).await
    }
}

/// Folds one row per (role, permission) into role definitions ordered by name.
fn aggregate_roles(rows: Vec<RoleRow>) -> AppResult<Vec<RoleDefinition>> {
    let mut by_name: BTreeMap<String, RoleDefinition> = BTreeMap::new();

    for row in rows {
        if !by_name.contains_key(&row.name) {
            let name = RoleName::new(row.name.as_str()).map_err(|error| {
                AppError::Internal(format!("invalid stored role '{}': {error}", row.name))
            })?;
            by_name.insert(
                row.name.clone(),
                RoleDefinition {
                    name,
                    display_name: row.display_name,
                    description: row.description,
                    is_system: row.is_system,
                    permissions: BTreeSet::new(),
                },
            );
        }

        if let (Some(role), Some(permission)) = (by_name.get_mut(&row.name), row.permission_name) {
            role.permissions.insert(stored_permission(permission)?);
        }
    }

    Ok(by_name.into_values().collect())
}
