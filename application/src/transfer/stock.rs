use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{AdjustmentReason, DestructStockAdjustment, StockAdjustment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustmentDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub delta: i32,
    pub reason: AdjustmentReason,
    pub balance: i32,
    pub operator: Option<Uuid>,
    pub sale_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
}

impl From<StockAdjustment> for StockAdjustmentDto {
    fn from(value: StockAdjustment) -> Self {
        let DestructStockAdjustment {
            id,
            book_id,
            delta,
            reason,
            balance,
            operator,
            sale_id,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            delta: delta.into(),
            reason,
            balance: balance.into(),
            operator: operator.map(Into::into),
            sale_id: sale_id.map(Into::into),
            created_at: created_at.into(),
        }
    }
}

pub struct AdjustStockDto {
    pub actor: Uuid,
    pub book_id: Uuid,
    pub delta: i32,
    pub reason: AdjustmentReason,
}

pub struct StockHistoryDto {
    pub book_id: Uuid,
}

pub struct ReconcileStockDto {
    pub book_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationDto {
    pub book_id: Uuid,
    pub ledger_balance: i64,
    pub stock: i32,
    pub drift: i64,
}

impl ReconciliationDto {
    pub fn is_consistent(&self) -> bool {
        self.drift == 0
    }
}
