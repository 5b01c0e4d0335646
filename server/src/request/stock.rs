use crate::controller::Intake;
use crate::request::Actor;
use application::transfer::{AdjustStockDto, ReconcileStockDto, StockHistoryDto};
use kernel::prelude::entity::AdjustmentReason;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    delta: i32,
    reason: AdjustmentReason,
}

#[derive(Debug)]
pub struct StockHistoryRequest {
    book_id: Uuid,
}

impl StockHistoryRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

#[derive(Debug)]
pub struct ReconcileRequest {
    book_id: Uuid,
}

impl ReconcileRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

pub struct StockTransformer;

impl Intake<(Actor, Uuid, AdjustStockRequest)> for StockTransformer {
    type To = AdjustStockDto;
    fn emit(&self, input: (Actor, Uuid, AdjustStockRequest)) -> Self::To {
        let (actor, book_id, input) = input;
        AdjustStockDto {
            actor: actor.into(),
            book_id,
            delta: input.delta,
            reason: input.reason,
        }
    }
}

impl Intake<StockHistoryRequest> for StockTransformer {
    type To = StockHistoryDto;
    fn emit(&self, input: StockHistoryRequest) -> Self::To {
        StockHistoryDto {
            book_id: input.book_id,
        }
    }
}

impl Intake<ReconcileRequest> for StockTransformer {
    type To = ReconcileStockDto;
    fn emit(&self, input: ReconcileRequest) -> Self::To {
        ReconcileStockDto {
            book_id: input.book_id,
        }
    }
}
