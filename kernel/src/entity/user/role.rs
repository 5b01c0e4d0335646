use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ProcessSales,
    ManageCatalog,
    Restock,
    AdjustStock,
    ViewReports,
    ManageUsers,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    User,
}

const ADMIN: &[Permission] = &[
    Permission::ProcessSales,
    Permission::ManageCatalog,
    Permission::Restock,
    Permission::AdjustStock,
    Permission::ViewReports,
    Permission::ManageUsers,
];

const MANAGER: &[Permission] = &[
    Permission::ProcessSales,
    Permission::ManageCatalog,
    Permission::Restock,
    Permission::AdjustStock,
    Permission::ViewReports,
];

const USER: &[Permission] = &[Permission::ProcessSales];

impl Role {
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::Admin => ADMIN,
            Role::Manager => MANAGER,
            Role::User => USER,
        }
    }

    pub fn permits(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown role: {s}"))),
        }
    }
}
