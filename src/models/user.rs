//! User model
//!
//! Back-office accounts, their roles, and what each role may write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// User role - maps to the `user_role` ENUM
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Secretary,
    Mechanic,
    Proprietor,
}

/// Write capabilities checked by the controllers. Reads are open to every
/// authenticated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Vehicles, selling prices and registrations
    ManageVehicleRecords,
    /// Customers and contractors
    ManageDirectory,
    ManageOrderRequisitions,
    /// Approve/disapprove labor items and edit their notes
    ReviewLaborItems,
    ManageLaborRepairForms,
    ManageWorkOrders,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Manager,
        Role::Secretary,
        Role::Mechanic,
        Role::Proprietor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Secretary => "SECRETARY",
            Role::Mechanic => "MECHANIC",
            Role::Proprietor => "PROPRIETOR",
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        use Permission::*;
        use Role::*;

        match permission {
            ManageVehicleRecords => matches!(self, Admin | Secretary),
            ManageDirectory | ManageOrderRequisitions | ManageLaborRepairForms => {
                matches!(self, Admin | Secretary | Manager | Proprietor)
            }
            ReviewLaborItems | ManageWorkOrders => matches!(self, Admin | Manager | Proprietor),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User row from the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// User data safe to return to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admin_and_secretary_write_vehicle_records() {
        for role in Role::ALL {
            let expected = matches!(role, Role::Admin | Role::Secretary);
            assert_eq!(role.can(Permission::ManageVehicleRecords), expected, "{}", role);
        }
    }

    #[test]
    fn test_mechanic_is_read_only() {
        use Permission::*;
        for permission in [
            ManageVehicleRecords,
            ManageDirectory,
            ManageOrderRequisitions,
            ReviewLaborItems,
            ManageLaborRepairForms,
            ManageWorkOrders,
        ] {
            assert!(!Role::Mechanic.can(permission));
        }
    }

    #[test]
    fn test_secretary_cannot_approve_labor() {
        assert!(!Role::Secretary.can(Permission::ReviewLaborItems));
        assert!(Role::Proprietor.can(Permission::ReviewLaborItems));
    }

    #[test]
    fn test_role_serde_format() {
        let json = serde_json::to_string(&Role::Proprietor).unwrap();
        assert_eq!(json, "\"PROPRIETOR\"");
        let role: Role = serde_json::from_str("\"SECRETARY\"").unwrap();
        assert_eq!(role, Role::Secretary);
    }
}
