use crate::controller::Exhaust;
use application::transfer::SaleDto;
use axum::Json;
use kernel::prelude::entity::{Money, PaymentMethod};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SaleItemResponse {
    book_id: Uuid,
    quantity: i32,
    unit_price: Money,
}

#[derive(Debug, Serialize)]
pub struct SaleResponse {
    id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    sold_at: OffsetDateTime,
    cashier: Option<Uuid>,
    items: Vec<SaleItemResponse>,
    total: Money,
    method: PaymentMethod,
    tendered: Money,
    change: Money,
    authorization: Option<String>,
}

pub struct SalePresenter;

impl Exhaust<SaleDto> for SalePresenter {
    type To = Json<SaleResponse>;
    fn emit(&self, input: SaleDto) -> Self::To {
        let items = input
            .items
            .into_iter()
            .map(|item| SaleItemResponse {
                book_id: item.book_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();
        Json(SaleResponse {
            id: input.id,
            sold_at: input.sold_at,
            cashier: input.cashier,
            items,
            total: input.total,
            method: input.method,
            tendered: input.tendered,
            change: input.change,
            authorization: input.authorization,
        })
    }
}
