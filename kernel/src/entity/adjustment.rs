mod delta;
mod id;
mod reason;

pub use self::{delta::*, id::*, reason::*};
use crate::entity::{BookId, CreatedAt, SaleId, StockQuantity, UserId};
use destructure::Destructure;
use serde::Serialize;
use vodca::References;

/// One immutable entry of the stock ledger.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct StockAdjustment {
    id: AdjustmentId,
    book_id: BookId,
    delta: StockDelta,
    reason: AdjustmentReason,
    balance: StockQuantity,
    operator: Option<UserId>,
    sale_id: Option<SaleId>,
    created_at: CreatedAt<StockAdjustment>,
}

impl StockAdjustment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: AdjustmentId,
        book_id: BookId,
        delta: StockDelta,
        reason: AdjustmentReason,
        balance: StockQuantity,
        operator: Option<UserId>,
        sale_id: Option<SaleId>,
        created_at: CreatedAt<StockAdjustment>,
    ) -> Self {
        Self {
            id,
            book_id,
            delta,
            reason,
            balance,
            operator,
            sale_id,
            created_at,
        }
    }
}

/// Sum of every delta ever recorded for a book.
pub fn ledger_balance<'a>(adjustments: impl IntoIterator<Item = &'a StockAdjustment>) -> i64 {
    adjustments
        .into_iter()
        .map(|adjustment| i64::from(adjustment.delta().value()))
        .sum()
}
