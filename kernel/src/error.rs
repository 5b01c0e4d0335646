use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound,
    Validation,
    InsufficientStock,
    InsufficientPayment,
    StockChanged,
    EmptyCart,
    PermissionDenied,
    Timeout,
    Internal,
}

impl KernelError {
    /// Stable machine-readable name, used in API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            KernelError::NotFound => "not_found",
            KernelError::Validation => "validation_error",
            KernelError::InsufficientStock => "insufficient_stock",
            KernelError::InsufficientPayment => "insufficient_payment",
            KernelError::StockChanged => "stock_changed",
            KernelError::EmptyCart => "empty_cart",
            KernelError::PermissionDenied => "permission_denied",
            KernelError::Timeout => "timeout",
            KernelError::Internal => "internal",
        }
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Entity not found"),
            KernelError::Validation => write!(f, "Invalid input"),
            KernelError::InsufficientStock => write!(f, "Not enough stock"),
            KernelError::InsufficientPayment => write!(f, "Tendered amount is below the total"),
            KernelError::StockChanged => write!(f, "Stock changed since the cart was built"),
            KernelError::EmptyCart => write!(f, "Cart is empty"),
            KernelError::PermissionDenied => write!(f, "Permission denied"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
