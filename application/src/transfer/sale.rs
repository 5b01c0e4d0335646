use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructSale, Money, PaymentMethod, Sale, SaleItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleItemDto {
    pub book_id: Uuid,
    pub quantity: i32,
    pub unit_price: Money,
}

impl From<SaleItem> for SaleItemDto {
    fn from(value: SaleItem) -> Self {
        Self {
            book_id: value.book_id().clone().into(),
            quantity: value.quantity().value(),
            unit_price: *value.unit_price(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDto {
    pub id: Uuid,
    pub sold_at: OffsetDateTime,
    pub cashier: Option<Uuid>,
    pub items: Vec<SaleItemDto>,
    pub total: Money,
    pub method: PaymentMethod,
    pub tendered: Money,
    pub change: Money,
    pub authorization: Option<String>,
}

impl From<Sale> for SaleDto {
    fn from(value: Sale) -> Self {
        let DestructSale {
            id,
            sold_at,
            cashier,
            items,
            total,
            payment,
        } = value.into_destruct();
        Self {
            id: id.into(),
            sold_at: sold_at.into(),
            cashier: cashier.map(Into::into),
            items: items.into_iter().map(SaleItemDto::from).collect(),
            total,
            method: *payment.method(),
            tendered: *payment.tendered(),
            change: *payment.change(),
            authorization: payment.authorization().clone(),
        }
    }
}

pub struct CheckoutDto {
    pub cashier: Uuid,
    pub tendered: Decimal,
    pub method: PaymentMethod,
    pub authorization: Option<String>,
}

pub struct GetSaleDto {
    pub id: Uuid,
}
