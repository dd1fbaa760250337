use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fleetdesk_application::{
    AccessTokenRecord, AccessTokenRepository, AuditEvent, AuditRepository,
    AuthorizationRepository, CompanyRecord, CompanyRepository, NewNotification,
    NotificationRecord, NotificationRepository, OverrideChange, SecurityAdminRepository,
    UserRecord, UserRepository,
};
use fleetdesk_core::{
    AppError, AppResult, COMPANY_ADMIN_ROLE, CompanyId, SUPER_ADMIN_ROLE, TenantScope, UserId,
};
use fleetdesk_domain::{PermissionDefinition, PermissionName, RoleDefinition, RoleName};
use uuid::Uuid;

use super::{InMemoryStore, StoredToken};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .map(|user| state.user_record(user)))
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| state.user_record(user)))
    }

    async fn list_users(&self, scope: TenantScope) -> AppResult<Vec<UserRecord>> {
        let state = self.state.read().await;
        let mut users: Vec<UserRecord> = state
            .users
            .iter()
            .filter(|user| scope.allows(user.company_id))
            .map(|user| state.user_record(user))
            .collect();
        users.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.email.cmp(&right.email))
        });
        Ok(users)
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))?;
        user.is_active = is_active;
        Ok(())
    }

    async fn upsert_super_admin(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> AppResult<UserId> {
        let mut state = self.state.write().await;
        if let Some(user) = state
            .users
            .iter_mut()
            .find(|user| user.email.eq_ignore_ascii_case(email))
        {
            if user.role != SUPER_ADMIN_ROLE {
                return Err(AppError::Conflict(format!(
                    "email '{email}' already belongs to a company account"
                )));
            }
            user.name = name.to_owned();
            user.password_hash = password_hash.to_owned();
            user.is_active = true;
            return Ok(user.id);
        }

        let id = UserId::new();
        state.users.push(UserRecord {
            id,
            name: name.to_owned(),
            email: email.to_ascii_lowercase(),
            password_hash: password_hash.to_owned(),
            company_id: None,
            role: SUPER_ADMIN_ROLE.to_owned(),
            is_active: true,
            company_is_active: true,
        });
        Ok(id)
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryStore {
    async fn create_token(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Uuid> {
        let mut state = self.state.write().await;
        if state.tokens.iter().any(|token| token.token_hash == token_hash) {
            return Err(AppError::Internal("access token hash collision".to_owned()));
        }

        let id = Uuid::new_v4();
        state.tokens.push(StoredToken {
            token_hash: token_hash.to_owned(),
            record: AccessTokenRecord {
                id,
                user_id,
                expires_at,
                last_used_at: None,
            },
            revoked_at: None,
        });
        Ok(id)
    }

    async fn find_active_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessTokenRecord>> {
        Ok(self
            .state
            .read()
            .await
            .tokens
            .iter()
            .find(|token| {
                token.token_hash == token_hash
                    && token.revoked_at.is_none()
                    && token.record.expires_at > now
            })
            .map(|token| token.record.clone()))
    }

    async fn touch_token(&self, token_id: Uuid, used_at: DateTime<Utc>) -> AppResult<()> {
        if let Some(token) = self
            .state
            .write()
            .await
            .tokens
            .iter_mut()
            .find(|token| token.record.id == token_id)
        {
            token.record.last_used_at = Some(used_at);
        }
        Ok(())
    }

    async fn revoke_token(&self, token_hash: &str, revoked_at: DateTime<Utc>) -> AppResult<()> {
        for token in &mut self.state.write().await.tokens {
            if token.token_hash == token_hash && token.revoked_at.is_none() {
                token.revoked_at = Some(revoked_at);
            }
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: UserId, revoked_at: DateTime<Utc>) -> AppResult<u64> {
        let mut revoked = 0;
        for token in &mut self.state.write().await.tokens {
            if token.record.user_id == user_id && token.revoked_at.is_none() {
                token.revoked_at = Some(revoked_at);
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn list_companies(&self, scope: TenantScope) -> AppResult<Vec<CompanyRecord>> {
        let mut companies: Vec<CompanyRecord> = self
            .state
            .read()
            .await
            .companies
            .iter()
            .filter(|company| scope.allows(Some(company.id)))
            .cloned()
            .collect();
        companies.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(companies)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn list_company_admin_recipients(&self, company_id: CompanyId) -> AppResult<Vec<UserId>> {
        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .filter(|user| {
                user.company_id == Some(company_id)
                    && user.role == COMPANY_ADMIN_ROLE
                    && user.is_active
            })
            .map(|user| user.id)
            .collect())
    }

    async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> AppResult<()> {
        let created_at = Utc::now();
        let mut state = self.state.write().await;
        state
            .notifications
            .extend(notifications.into_iter().map(|notification| NotificationRecord {
                id: Uuid::new_v4(),
                user_id: notification.user_id,
                company_id: notification.company_id,
                kind: notification.kind,
                title: notification.title,
                message: notification.message,
                read_at: None,
                created_at,
            }));
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId) -> AppResult<Vec<NotificationRecord>> {
        Ok(self
            .state
            .read()
            .await
            .notifications
            .iter()
            .rev()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn mark_read(
        &self,
        user_id: UserId,
        notification_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<Option<NotificationRecord>> {
        Ok(self
            .state
            .write()
            .await
            .notifications
            .iter_mut()
            .find(|notification| notification.id == notification_id && notification.user_id == user_id)
            .map(|notification| {
                notification.read_at.get_or_insert(read_at);
                notification.clone()
            }))
    }
}

#[async_trait]
impl AuditRepository for InMemoryStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.state.write().await.audit_events.push(event);
        Ok(())
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryStore {
    async fn list_permission_catalog(&self) -> AppResult<Vec<PermissionDefinition>> {
        Ok(self.catalog.clone())
    }

    async fn role_grants_permission(
        &self,
        role: &str,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        Ok(self
            .state
            .read()
            .await
            .roles
            .iter()
            .any(|definition| definition.name.as_str() == role && definition.grants(permission)))
    }

    async fn list_role_permissions(&self, role: &str) -> AppResult<BTreeSet<PermissionName>> {
        Ok(self
            .state
            .read()
            .await
            .roles
            .iter()
            .find(|definition| definition.name.as_str() == role)
            .map(|definition| definition.permissions.clone())
            .unwrap_or_default())
    }

    async fn find_user_override(
        &self,
        user_id: UserId,
        permission: &PermissionName,
    ) -> AppResult<Option<bool>> {
        Ok(self
            .state
            .read()
            .await
            .overrides
            .get(&user_id)
            .and_then(|overrides| overrides.get(permission).copied()))
    }

    async fn list_user_overrides(
        &self,
        user_id: UserId,
    ) -> AppResult<BTreeMap<PermissionName, bool>> {
        Ok(self
            .state
            .read()
            .await
            .overrides
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SecurityAdminRepository for InMemoryStore {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        Ok(self.state.read().await.roles.clone())
    }

    async fn find_role(&self, role: &RoleName) -> AppResult<Option<RoleDefinition>> {
        Ok(self
            .state
            .read()
            .await
            .roles
            .iter()
            .find(|definition| &definition.name == role)
            .cloned())
    }

    async fn replace_role_permissions(
        &self,
        role: &RoleName,
        permissions: &BTreeSet<PermissionName>,
    ) -> AppResult<RoleDefinition> {
        self.ensure_catalog_contains(permissions.iter())?;

        let mut state = self.state.write().await;
        let definition = state
            .roles
            .iter_mut()
            .find(|definition| &definition.name == role)
            .ok_or_else(|| AppError::NotFound(format!("role '{role}' does not exist")))?;
        definition.permissions = permissions.clone();
        Ok(definition.clone())
    }

    async fn apply_user_overrides(
        &self,
        user_id: UserId,
        changes: &[OverrideChange],
    ) -> AppResult<()> {
        self.ensure_catalog_contains(changes.iter().map(|change| &change.permission))?;

        let mut state = self.state.write().await;
        let overrides = state.overrides.entry(user_id).or_default();
        for change in changes {
            match change.granted {
                Some(granted) => {
                    overrides.insert(change.permission.clone(), granted);
                }
                None => {
                    overrides.remove(&change.permission);
                }
            }
        }
        Ok(())
    }
}

impl InMemoryStore {
    /// Mirrors the foreign key on permission names.
    fn ensure_catalog_contains<'a>(
        &self,
        mut permissions: impl Iterator<Item = &'a PermissionName>,
    ) -> AppResult<()> {
        if permissions.all(|permission| {
            self.catalog
                .iter()
                .any(|definition| &definition.name == permission)
        }) {
            return Ok(());
        }

        Err(AppError::NotFound(
            "one or more permissions do not exist".to_owned(),
        ))
    }
}
