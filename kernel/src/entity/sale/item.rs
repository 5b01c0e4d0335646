use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::{BookId, CartLine, Money, Quantity};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct SaleItem {
    book_id: BookId,
    quantity: Quantity,
    unit_price: Money,
}

impl SaleItem {
    pub fn new(book_id: BookId, quantity: Quantity, unit_price: Money) -> Self {
        Self {
            book_id,
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> Option<Money> {
        self.unit_price.checked_mul(i64::from(self.quantity.value()))
    }
}

impl From<&CartLine> for SaleItem {
    fn from(line: &CartLine) -> Self {
        Self::new(line.book_id().clone(), *line.quantity(), *line.unit_price())
    }
}
