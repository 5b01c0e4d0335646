use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::Money;
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Mobile,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Mobile => "mobile",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "mobile" => Ok(PaymentMethod::Mobile),
            _ => Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Unknown payment method: {s}"))),
        }
    }
}

/// Settled payment for a sale.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct Payment {
    method: PaymentMethod,
    tendered: Money,
    change: Money,
    authorization: Option<String>,
}

impl Payment {
    /// Rebuilds a payment that was already settled, e.g. from storage.
    pub fn new(
        method: PaymentMethod,
        tendered: Money,
        change: Money,
        authorization: Option<String>,
    ) -> Self {
        Self {
            method,
            tendered,
            change,
            authorization,
        }
    }

    /// Settles `tendered` against `total`.
    ///
    /// Cash must cover the total and yields change. Every other method must
    /// carry an authorization reference from the provider; it is recorded as
    /// paying the exact total.
    pub fn settle(
        method: PaymentMethod,
        tendered: Money,
        authorization: Option<String>,
        total: Money,
    ) -> error_stack::Result<Self, KernelError> {
        match method {
            PaymentMethod::Cash => {
                if tendered < total {
                    return Err(Report::new(KernelError::InsufficientPayment)
                        .attach_printable(format!("Tendered {tendered} for a total of {total}")));
                }
                let change = tendered.checked_sub(total).ok_or_else(|| {
                    Report::new(KernelError::Validation)
                        .attach_printable(format!("Change for {tendered} against {total} overflowed"))
                })?;
                Ok(Self::new(method, tendered, change, None))
            }
            _ => {
                let authorization = authorization
                    .map(|reference| reference.trim().to_string())
                    .filter(|reference| !reference.is_empty())
                    .ok_or_else(|| {
                        Report::new(KernelError::Validation).attach_printable(format!(
                            "{method} payment requires an authorization reference"
                        ))
                    })?;
                Ok(Self::new(method, total, Money::ZERO, Some(authorization)))
            }
        }
    }
}
