use crate::controller::Exhaust;
use application::transfer::{ReconciliationDto, StockAdjustmentDto};
use axum::Json;
use kernel::prelude::entity::AdjustmentReason;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct StockAdjustmentResponse {
    id: Uuid,
    book_id: Uuid,
    delta: i32,
    reason: AdjustmentReason,
    balance: i32,
    operator: Option<Uuid>,
    sale_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct ReconciliationResponse {
    book_id: Uuid,
    ledger_balance: i64,
    stock: i32,
    drift: i64,
    consistent: bool,
}

pub struct StockPresenter;

impl Exhaust<Vec<StockAdjustmentDto>> for StockPresenter {
    type To = Json<Vec<StockAdjustmentResponse>>;
    fn emit(&self, input: Vec<StockAdjustmentDto>) -> Self::To {
        let history = input
            .into_iter()
            .map(|adjustment| StockAdjustmentResponse {
                id: adjustment.id,
                book_id: adjustment.book_id,
                delta: adjustment.delta,
                reason: adjustment.reason,
                balance: adjustment.balance,
                operator: adjustment.operator,
                sale_id: adjustment.sale_id,
                created_at: adjustment.created_at,
            })
            .collect::<Vec<_>>();
        Json(history)
    }
}

impl Exhaust<ReconciliationDto> for StockPresenter {
    type To = Json<ReconciliationResponse>;
    fn emit(&self, input: ReconciliationDto) -> Self::To {
        Json(ReconciliationResponse {
            book_id: input.book_id,
            ledger_balance: input.ledger_balance,
            stock: input.stock,
            drift: input.drift,
            consistent: input.is_consistent(),
        })
    }
}
