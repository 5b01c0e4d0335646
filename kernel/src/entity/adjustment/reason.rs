use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::entity::Permission;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    Sale,
    Restock,
    Manual,
    Correction,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Sale => "sale",
            AdjustmentReason::Restock => "restock",
            AdjustmentReason::Manual => "manual",
            AdjustmentReason::Correction => "correction",
        }
    }

    /// Permission an operator needs to record this reason by hand. Sales are
    /// only ever recorded by checkout, so they have none.
    pub fn required_permission(&self) -> Option<Permission> {
        match self {
            AdjustmentReason::Sale => None,
            AdjustmentReason::Restock => Some(Permission::Restock),
            AdjustmentReason::Manual | AdjustmentReason::Correction => {
                Some(Permission::AdjustStock)
            }
        }
    }
}

impl Display for AdjustmentReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustmentReason {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sale" => Ok(AdjustmentReason::Sale),
            "restock" => Ok(AdjustmentReason::Restock),
            "manual" => Ok(AdjustmentReason::Manual),
            "correction" => Ok(AdjustmentReason::Correction),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown adjustment reason: {s}"))),
        }
    }
}
