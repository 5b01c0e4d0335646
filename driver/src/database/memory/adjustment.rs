use kernel::interface::query::StockAdjustmentQuery;
use kernel::interface::update::StockAdjustmentModifier;
use kernel::prelude::entity::{ledger_balance, BookId, StockAdjustment};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryStockAdjustmentRepository;

#[async_trait::async_trait]
impl StockAdjustmentQuery for InMemoryStockAdjustmentRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<StockAdjustment>, KernelError> {
        Ok(con
            .state()
            .adjustments
            .iter()
            .filter(|adjustment| adjustment.book_id() == book_id)
            .cloned()
            .collect())
    }

    async fn sum_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        Ok(ledger_balance(
            con.state()
                .adjustments
                .iter()
                .filter(|adjustment| adjustment.book_id() == book_id),
        ))
    }
}

#[async_trait::async_trait]
impl StockAdjustmentModifier for InMemoryStockAdjustmentRepository {
    type Transaction = InMemoryTransaction;
    async fn record(
        &self,
        con: &mut InMemoryTransaction,
        adjustment: &StockAdjustment,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut().adjustments.push(adjustment.clone());
        Ok(())
    }
}
