//! In-memory adapter implementing every repository port.
//!
//! Seeded with the same catalog and roles as the SQL migrations. The API's
//! router tests run against it.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use fleetdesk_application::{AccessTokenRecord, AuditEvent, CompanyRecord, NotificationRecord, UserRecord};
use fleetdesk_core::{AppError, AppResult, CompanyId, UserId};
use fleetdesk_domain::{
    EmailAddress, PermissionDefinition, PermissionName, RoleDefinition, RoleName,
};
use tokio::sync::RwLock;

mod ports;
mod seed;


#[derive(Debug, Clone)]
struct StoredToken {
    token_hash: String,
    record: AccessTokenRecord,
    revoked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreState {
    companies: Vec<CompanyRecord>,
    users: Vec<UserRecord>,
    roles: Vec<RoleDefinition>,
    overrides: HashMap<UserId, BTreeMap<PermissionName, bool>>,
    tokens: Vec<StoredToken>,
    notifications: Vec<NotificationRecord>,
    audit_events: Vec<AuditEvent>,
}

impl StoreState {
    fn company_is_active(&self, company_id: Option<CompanyId>) -> bool {
        company_id.is_none_or(|company_id| {
            self.companies
                .iter()
                .any(|company| company.id == company_id && company.is_active)
        })
    }

    /// Returns the user with the company flag refreshed.
    fn user_record(&self, user: &UserRecord) -> UserRecord {
        UserRecord {
            company_is_active: self.company_is_active(user.company_id),
            ..user.clone()
        }
    }
}

/// Account to create with [`InMemoryStore::insert_user`].
#[derive(Debug, Clone)]
pub struct NewUserAccount {
    /// Display name.
    pub name: String,
    /// Email address, canonicalized on insert.
    pub email: String,
    /// Already hashed password.
    pub password_hash: String,
    /// Owning company.
    pub company_id: CompanyId,
    /// Seeded role name.
    pub role: String,
}

/// Shared in-memory state behind every repository port.
#[derive(Debug)]
pub struct InMemoryStore {
    catalog: Vec<PermissionDefinition>,
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates a store holding the seeded catalog and roles.
    pub fn seeded() -> AppResult<Self> {
        let catalog = seed::catalog()?;
        let roles = seed::roles(&catalog)?;

        Ok(Self {
            catalog,
            state: RwLock::new(StoreState {
                roles,
                ..StoreState::default()
            }),
        })
    }

    /// Creates an active company.
    pub async fn insert_company(&self, name: &str) -> CompanyId {
        let id = CompanyId::new();
        self.state.write().await.companies.push(CompanyRecord {
            id,
            name: name.to_owned(),
            is_active: true,
        });
        id
    }

    /// Enables or disables a company.
    pub async fn set_company_active(&self, company_id: CompanyId, is_active: bool) -> AppResult<()> {
        let mut state = self.state.write().await;
        let company = state
            .companies
            .iter_mut()
            .find(|company| company.id == company_id)
            .ok_or_else(|| AppError::NotFound(format!("company '{company_id}' does not exist")))?;
        company.is_active = is_active;
        Ok(())
    }

    /// Creates an active company user.
    ///
    /// The role must exist and the email must be unused.
    pub async fn insert_user(&self, account: NewUserAccount) -> AppResult<UserId> {
        let email = EmailAddress::new(account.email)?;
        let mut state = self.state.write().await;

        if !state.companies.iter().any(|company| company.id == account.company_id) {
            return Err(AppError::NotFound(format!(
                "company '{}' does not exist",
                account.company_id
            )));
        }

        let role = RoleName::new(account.role)?;
        if !state.roles.iter().any(|definition| definition.name == role) {
            return Err(AppError::NotFound(format!("role '{role}' does not exist")));
        }

        if state.users.iter().any(|user| user.email == email.as_str()) {
            return Err(AppError::Conflict(format!(
                "email '{}' is already registered",
                email.as_str()
            )));
        }

        let id = UserId::new();
        state.users.push(UserRecord {
            id,
            name: account.name,
            email: email.as_str().to_owned(),
            password_hash: account.password_hash,
            company_id: Some(account.company_id),
            role: role.as_str().to_owned(),
            is_active: true,
            company_is_active: true,
        });
        Ok(id)
    }

    /// Returns every audit event in insertion order.
    pub async fn audit_events(&self) -> Vec<AuditEvent> {
        self.state.read().await.audit_events.clone()
    }
}
