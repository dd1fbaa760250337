use std::fmt::{Display, Formatter};
use std::str::FromStr;

use fleetdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum accepted length of a permission or role name.
pub const MAX_NAME_LENGTH: usize = 64;

/// Validated permission name such as `view_vehicles`.
///
/// Names are lowercase ASCII snake case. The catalog, not this type,
/// decides whether a name actually exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(String);

impl PermissionName {
    /// Creates a validated permission name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        validate_snake_case_name("permission", value.as_str())?;
        Ok(Self(value))
    }

    /// Returns the stored name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for PermissionName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionName> for String {
    fn from(value: PermissionName) -> Self {
        value.0
    }
}

impl Display for PermissionName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

pub(crate) fn validate_snake_case_name(kind: &str, value: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::Validation(format!("{kind} name must not be empty")));
    }

    if value.len() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "{kind} name must not exceed {MAX_NAME_LENGTH} characters"
        )));
    }

    let valid = value
        .chars()
        .all(|character| character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_')
        && value.starts_with(|character: char| character.is_ascii_lowercase());

    if !valid {
        return Err(AppError::Validation(format!(
            "{kind} name '{value}' must be lowercase snake_case"
        )));
    }

    Ok(())
}

/// Functional module a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionModule {
    /// Fleet vehicles.
    Vehicles,
    /// Rental contracts.
    Rentals,
    /// Vehicle maintenances.
    Maintenances,
    /// Company users.
    Users,
    /// Financial reporting.
    Finances,
    /// Maintenance and document reminders.
    Reminders,
}

impl PermissionModule {
    /// Returns a stable storage value for this module.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Rentals => "rentals",
            Self::Maintenances => "maintenances",
            Self::Users => "users",
            Self::Finances => "finances",
            Self::Reminders => "reminders",
        }
    }

    /// Returns every module in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PermissionModule] = &[
            PermissionModule::Vehicles,
            PermissionModule::Rentals,
            PermissionModule::Maintenances,
            PermissionModule::Users,
            PermissionModule::Finances,
            PermissionModule::Reminders,
        ];

        ALL
    }
}

impl FromStr for PermissionModule {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "vehicles" => Ok(Self::Vehicles),
            "rentals" => Ok(Self::Rentals),
            "maintenances" => Ok(Self::Maintenances),
            "users" => Ok(Self::Users),
            "finances" => Ok(Self::Finances),
            "reminders" => Ok(Self::Reminders),
            _ => Err(AppError::Validation(format!(
                "unknown permission module '{value}'"
            ))),
        }
    }
}

/// Catalog entry describing one capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionDefinition {
    /// Globally unique name.
    pub name: PermissionName,
    /// Human readable label.
    pub display_name: String,
    /// Owning module.
    pub module: PermissionModule,
    /// Longer description shown in the permission editor.
    pub description: Option<String>,
}

/// Catalog entries of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup {
    /// Module shared by every entry.
    pub module: PermissionModule,
    /// Entries sorted by name.
    pub permissions: Vec<PermissionDefinition>,
}

/// Groups catalog entries by module in module display order.
///
/// Modules without entries are omitted.
#[must_use]
pub fn group_by_module(catalog: Vec<PermissionDefinition>) -> Vec<PermissionGroup> {
    let mut groups: Vec<PermissionGroup> = PermissionModule::all()
        .iter()
        .map(|module| PermissionGroup {
            module: *module,
            permissions: Vec::new(),
        })
        .collect();

    for definition in catalog {
        if let Some(group) = groups
            .iter_mut()
            .find(|group| group.module == definition.module)
        {
            group.permissions.push(definition);
        }
    }

    groups.retain(|group| !group.permissions.is_empty());
    for group in &mut groups {
        group
            .permissions
            .sort_by(|left, right| left.name.cmp(&right.name));
    }

    groups
}
