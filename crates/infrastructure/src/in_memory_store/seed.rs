//! Catalog and roles mirroring the SQL seed migration.

use std::collections::BTreeSet;

use fleetdesk_core::{AppResult, COMPANY_ADMIN_ROLE};
use fleetdesk_domain::{
    PermissionDefinition, PermissionModule, PermissionName, RoleDefinition, RoleName,
};

const CATALOG: &[(&str, &str, PermissionModule, &str)] = &[
    ("view_vehicles", "View vehicles", PermissionModule::Vehicles, "List and open fleet vehicles"),
    ("create_vehicles", "Create vehicles", PermissionModule::Vehicles, "Register new vehicles"),
    ("edit_vehicles", "Edit vehicles", PermissionModule::Vehicles, "Update vehicle details and status"),
    ("delete_vehicles", "Delete vehicles", PermissionModule::Vehicles, "Remove vehicles from the fleet"),
    ("view_rentals", "View rentals", PermissionModule::Rentals, "List and open rental contracts"),
    ("create_rentals", "Create rentals", PermissionModule::Rentals, "Open new rental contracts"),
    ("edit_rentals", "Edit rentals", PermissionModule::Rentals, "Update and close rental contracts"),
    ("delete_rentals", "Delete rentals", PermissionModule::Rentals, "Remove rental contracts"),
    ("view_maintenances", "View maintenances", PermissionModule::Maintenances, "List maintenance records"),
    ("create_maintenances", "Create maintenances", PermissionModule::Maintenances, "Log maintenance work"),
    ("edit_maintenances", "Edit maintenances", PermissionModule::Maintenances, "Update maintenance records"),
    ("delete_maintenances", "Delete maintenances", PermissionModule::Maintenances, "Remove maintenance records"),
    ("view_users", "View users", PermissionModule::Users, "List company users"),
    ("create_users", "Create users", PermissionModule::Users, "Invite and create company users"),
    ("edit_users", "Edit users", PermissionModule::Users, "Update company users"),
    ("delete_users", "Delete users", PermissionModule::Users, "Remove company users"),
    ("view_finances", "View finances", PermissionModule::Finances, "Open revenue and cost reports"),
    ("export_finances", "Export finances", PermissionModule::Finances, "Export financial reports"),
    ("view_reminders", "View reminders", PermissionModule::Reminders, "See maintenance and document reminders"),
    ("manage_reminders", "Manage reminders", PermissionModule::Reminders, "Create, edit and dismiss reminders"),
];

const ROLES: &[(&str, &str, &str, bool, &[&str])] = &[
    ("employee", "Employee", "Read-only access to daily operations", true, &[
        "view_vehicles",
        "view_rentals",
        "view_maintenances",
        "view_reminders",
    ]),
    ("fleet_manager", "Fleet manager", "Runs vehicles and maintenance", false, &[
        "view_vehicles",
        "create_vehicles",
        "edit_vehicles",
        "delete_vehicles",
        "view_maintenances",
        "create_maintenances",
        "edit_maintenances",
        "delete_maintenances",
        "view_rentals",
        "view_reminders",
        "manage_reminders",
    ]),
    ("mechanic", "Mechanic", "Logs maintenance work", false, &[
        "view_vehicles",
        "view_maintenances",
        "create_maintenances",
        "edit_maintenances",
    ]),
    ("rental_agent", "Rental agent", "Opens rental contracts", false, &[
        "view_vehicles",
        "view_rentals",
        "create_rentals",
    ]),
];

pub(super) fn catalog() -> AppResult<Vec<PermissionDefinition>> {
    CATALOG
        .iter()
        .map(|(name, display_name, module, description)| {
            Ok(PermissionDefinition {
                name: PermissionName::new(*name)?,
                display_name: (*display_name).to_owned(),
                module: *module,
                description: Some((*description).to_owned()),
            })
        })
        .collect()
}

/// Company admin gets the whole catalog, like the migration does.
pub(super) fn roles(catalog: &[PermissionDefinition]) -> AppResult<Vec<RoleDefinition>> {
    let mut roles = vec![RoleDefinition {
        name: RoleName::new(COMPANY_ADMIN_ROLE)?,
        display_name: "Company admin".to_owned(),
        description: Some("Full access within one company".to_owned()),
        is_system: true,
        permissions: catalog.iter().map(|definition| definition.name.clone()).collect(),
    }];

    for (name, display_name, description, is_system, permissions) in ROLES {
        roles.push(RoleDefinition {
            name: RoleName::new(*name)?,
            display_name: (*display_name).to_owned(),
            description: Some((*description).to_owned()),
            is_system: *is_system,
            permissions: permissions
                .iter()
                .map(|permission| PermissionName::new(*permission))
                .collect::<AppResult<BTreeSet<_>>>()?,
        });
    }

    roles.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(roles)
}
