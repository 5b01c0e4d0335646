use error_stack::Report;
use uuid::Uuid;

use kernel::prelude::entity::{Cart, CartLine, Money};
use kernel::KernelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineDto {
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: Money,
    pub subtotal: Money,
}

impl TryFrom<&CartLine> for CartLineDto {
    type Error = Report<KernelError>;
    fn try_from(value: &CartLine) -> Result<Self, Self::Error> {
        let subtotal = value.subtotal().ok_or_else(|| {
            Report::new(KernelError::Validation).attach_printable("Cart line subtotal overflowed")
        })?;
        Ok(Self {
            book_id: value.book_id().clone().into(),
            quantity: value.quantity().value(),
            unit_price: *value.unit_price(),
            subtotal,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDto {
    pub lines: Vec<CartLineDto>,
    pub total: Money,
}

impl TryFrom<&Cart> for CartDto {
    type Error = Report<KernelError>;
    fn try_from(value: &Cart) -> Result<Self, Self::Error> {
        Ok(Self {
            lines: value
                .lines()
                .iter()
                .map(CartLineDto::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            total: value.total()?,
        })
    }
}

pub struct AddToCartDto {
    pub book_id: Uuid,
    pub quantity: i32,
}
