use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookId, StockAdjustment};
use crate::KernelError;

#[async_trait::async_trait]
pub trait StockAdjustmentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Ledger entries of one book in append order.
    async fn find_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<StockAdjustment>, KernelError>;

    async fn sum_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnStockAdjustmentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type StockAdjustmentQuery: StockAdjustmentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn stock_adjustment_query(&self) -> &Self::StockAdjustmentQuery;
}
