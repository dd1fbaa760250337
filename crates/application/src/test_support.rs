//! Shared in-memory fakes for service tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use fleetdesk_core::{
    AppError, AppResult, COMPANY_ADMIN_ROLE, CompanyId, SUPER_ADMIN_ROLE, TenantScope, UserId,
};
use fleetdesk_domain::{
    PermissionDefinition, PermissionModule, PermissionName, RoleDefinition, RoleName,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::security_admin_ports::{OverrideChange, SecurityAdminRepository};
use crate::{
    AccessTokenRecord, AccessTokenRepository, AccessTokenService, AuditEvent, AuditRepository,
    AuthorizationRepository, AuthorizationService, NewNotification, NotificationRecord,
    NotificationRepository, NotificationService, PasswordHasher, SecurityAdminService,
    UserRecord, UserRepository, UserService,
};

pub(crate) fn permission(value: &str) -> PermissionName {
    PermissionName::new(value).unwrap_or_else(|_| unreachable!())
}

fn role_name(value: &str) -> RoleName {
    RoleName::new(value).unwrap_or_else(|_| unreachable!())
}

#[derive(Default)]
pub(crate) struct FakeState {
    pub(crate) users: Vec<UserRecord>,
    pub(crate) roles: Vec<RoleDefinition>,
    pub(crate) overrides: HashMap<UserId, BTreeMap<PermissionName, bool>>,
    pub(crate) tokens: Vec<(String, AccessTokenRecord, bool)>,
    pub(crate) notifications: Vec<NotificationRecord>,
    pub(crate) audit_events: Vec<AuditEvent>,
}

/// One fake implementing every port, so services share state like they
/// would share a database.
pub(crate) struct FakeStore {
    pub(crate) catalog: Vec<PermissionDefinition>,
    pub(crate) state: Mutex<FakeState>,
}

impl FakeStore {
    pub(crate) fn seeded() -> Arc<Self> {
        let catalog: Vec<PermissionDefinition> = [
            ("view_vehicles", PermissionModule::Vehicles),
            ("create_vehicles", PermissionModule::Vehicles),
            ("view_rentals", PermissionModule::Rentals),
            ("create_rentals", PermissionModule::Rentals),
            ("edit_rentals", PermissionModule::Rentals),
            ("view_users", PermissionModule::Users),
            ("export_finances", PermissionModule::Finances),
        ]
        .into_iter()
        .map(|(value, module)| PermissionDefinition {
            name: permission(value),
            display_name: value.replace('_', " "),
            module,
            description: None,
        })
        .collect();

        let all: BTreeSet<PermissionName> =
            catalog.iter().map(|definition| definition.name.clone()).collect();
        let roles = vec![
            RoleDefinition {
                name: role_name(COMPANY_ADMIN_ROLE),
                display_name: "Company admin".to_owned(),
                description: None,
                is_system: true,
                permissions: all,
            },
            RoleDefinition {
                name: role_name("employee"),
                display_name: "Employee".to_owned(),
                description: None,
                is_system: true,
                permissions: BTreeSet::from([permission("view_vehicles"), permission("view_rentals")]),
            },
            RoleDefinition {
                name: role_name("rental_agent"),
                display_name: "Rental agent".to_owned(),
                description: None,
                is_system: false,
                permissions: BTreeSet::from([
                    permission("view_vehicles"),
                    permission("view_rentals"),
                    permission("create_rentals"),
                ]),
            },
        ];

        Arc::new(Self {
            catalog,
            state: Mutex::new(FakeState {
                roles,
                ..FakeState::default()
            }),
        })
    }

    pub(crate) async fn add_user(&self, role: &str, company_id: Option<CompanyId>) -> UserRecord {
        let id = UserId::new();
        let user = UserRecord {
            id,
            name: format!("{role} {}", &id.to_string()[..8]),
            email: format!("{}@fleet.test", id.as_uuid().simple()),
            password_hash: "hashed:correct horse battery".to_owned(),
            company_id,
            role: role.to_owned(),
            is_active: true,
            company_is_active: true,
        };
        self.state.lock().await.users.push(user.clone());
        user
    }

    pub(crate) async fn user(&self, user_id: UserId) -> Option<UserRecord> {
        self.state
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.id == user_id)
            .cloned()
    }

    /// Flips the status flag without revoking tokens.
    pub(crate) async fn force_active(&self, user_id: UserId, is_active: bool) {
        for user in &mut self.state.lock().await.users {
            if user.id == user_id {
                user.is_active = is_active;
            }
        }
    }

    pub(crate) fn user_service(self: &Arc<Self>) -> UserService {
        UserService::new(
            self.clone(),
            Arc::new(FakePasswordHasher),
            AccessTokenService::new(self.clone(), Duration::hours(1)),
            NotificationService::new(self.clone()),
            self.clone(),
        )
    }

    pub(crate) fn security_admin_service(self: &Arc<Self>) -> SecurityAdminService {
        SecurityAdminService::new(
            AuthorizationService::new(self.clone()),
            self.clone(),
            self.clone(),
            NotificationService::new(self.clone()),
            self.clone(),
        )
    }
}

/// Prefix hasher: `hashed:<password>`.
pub(crate) struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

#[async_trait]
impl UserRepository for FakeStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.user(user_id).await)
    }

    async fn list_users(&self, scope: TenantScope) -> AppResult<Vec<UserRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .filter(|user| scope.allows(user.company_id))
            .cloned()
            .collect())
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> AppResult<()> {
        let mut state = self.state.lock().await;
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
        let mut state = self.state.lock().await;
        if let Some(user) = state.users.iter_mut().find(|user| user.email == email) {
            user.name = name.to_owned();
            user.password_hash = password_hash.to_owned();
            user.is_active = true;
            return Ok(user.id);
        }

        let id = UserId::new();
        state.users.push(UserRecord {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
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
impl AccessTokenRepository for FakeStore {
    async fn create_token(
        &self,
        user_id: UserId,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        self.state.lock().await.tokens.push((
            token_hash.to_owned(),
            AccessTokenRecord {
                id,
                user_id,
                expires_at,
                last_used_at: None,
            },
            false,
        ));
        Ok(id)
    }

    async fn find_active_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<AccessTokenRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .tokens
            .iter()
            .find(|(hash, record, revoked)| hash == token_hash && !revoked && record.expires_at > now)
            .map(|(_, record, _)| record.clone()))
    }

    async fn touch_token(&self, token_id: Uuid, used_at: DateTime<Utc>) -> AppResult<()> {
        for (_, record, _) in &mut self.state.lock().await.tokens {
            if record.id == token_id {
                record.last_used_at = Some(used_at);
            }
        }
        Ok(())
    }

    async fn revoke_token(&self, token_hash: &str, _revoked_at: DateTime<Utc>) -> AppResult<()> {
        for (hash, _, revoked) in &mut self.state.lock().await.tokens {
            if hash == token_hash {
                *revoked = true;
            }
        }
        Ok(())
    }

    async fn revoke_all_for_user(&self, user_id: UserId, _revoked_at: DateTime<Utc>) -> AppResult<u64> {
        let mut count = 0;
        for (_, record, revoked) in &mut self.state.lock().await.tokens {
            if record.user_id == user_id && !*revoked {
                *revoked = true;
                count += 1;
            }
        }
        Ok(count)
    }
}

#[async_trait]
impl NotificationRepository for FakeStore {
    async fn list_company_admin_recipients(&self, company_id: CompanyId) -> AppResult<Vec<UserId>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .filter(|user| {
                user.company_id == Some(company_id) && user.role == COMPANY_ADMIN_ROLE && user.is_active
            })
            .map(|user| user.id)
            .collect())
    }

    async fn insert_notifications(&self, notifications: Vec<NewNotification>) -> AppResult<()> {
        let mut state = self.state.lock().await;
        for notification in notifications {
            state.notifications.push(NotificationRecord {
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
            .state
            .lock()
            .await
            .notifications
            .iter()
            .rev()
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
        Ok(self
            .state
            .lock()
            .await
            .notifications
            .iter_mut()
            .find(|row| row.id == notification_id && row.user_id == user_id)
            .map(|row| {
                row.read_at = Some(read_at);
                row.clone()
            }))
    }
}

#[async_trait]
impl AuditRepository for FakeStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.state.lock().await.audit_events.push(event);
        Ok(())
    }
}

#[async_trait]
impl AuthorizationRepository for FakeStore {
    async fn list_permission_catalog(&self) -> AppResult<Vec<PermissionDefinition>> {
        Ok(self.catalog.clone())
    }

    async fn role_grants_permission(
        &self,
        role: &str,
        permission: &PermissionName,
    ) -> AppResult<bool> {
        Ok(self.list_role_permissions(role).await?.contains(permission))
    }

    async fn list_role_permissions(&self, role: &str) -> AppResult<BTreeSet<PermissionName>> {
        Ok(self
            .state
            .lock()
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
            .lock()
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
            .lock()
            .await
            .overrides
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SecurityAdminRepository for FakeStore {
    async fn list_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        Ok(self.state.lock().await.roles.clone())
    }

    async fn find_role(&self, role: &RoleName) -> AppResult<Option<RoleDefinition>> {
        Ok(self
            .state
            .lock()
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
        let mut state = self.state.lock().await;
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
        let mut state = self.state.lock().await;
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
