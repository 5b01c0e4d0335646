use error_stack::Report;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnStockAdjustmentQuery, StockAdjustmentQuery,
};
use kernel::prelude::entity::BookId;
use kernel::KernelError;

use crate::transfer::{ReconcileStockDto, ReconciliationDto, StockAdjustmentDto, StockHistoryDto};

// Deleted books stay reachable here so their ledger can still be audited.
fn not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach(id.clone())
        .attach_printable(format!("Book {id} not found"))
}

#[async_trait::async_trait]
pub trait ReconcileStockService:
    'static + Sync + Send + DependOnBookQuery + DependOnStockAdjustmentQuery
{
    /// Compares the ledger sum with the stored stock. Any difference means
    /// stock moved outside the adjustment routine and is reported as drift.
    #[tracing::instrument(skip_all)]
    async fn reconcile(
        &self,
        dto: ReconcileStockDto,
    ) -> error_stack::Result<ReconciliationDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.book_id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        let ledger_balance = self
            .stock_adjustment_query()
            .sum_by_book_id(&mut connection, &id)
            .await?;
        let stock = book.stock().value();
        let drift = i64::from(stock) - ledger_balance;
        if drift != 0 {
            tracing::warn!(book_id = %id, ledger_balance, stock, drift, "Stock ledger drift");
        }
        Ok(ReconciliationDto {
            book_id: dto.book_id,
            ledger_balance,
            stock,
            drift,
        })
    }
}

impl<T> ReconcileStockService for T where T: DependOnBookQuery + DependOnStockAdjustmentQuery {}

#[async_trait::async_trait]
pub trait StockHistoryService:
    'static + Sync + Send + DependOnBookQuery + DependOnStockAdjustmentQuery
{
    async fn stock_history(
        &self,
        dto: StockHistoryDto,
    ) -> error_stack::Result<Vec<StockAdjustmentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.book_id);
        self.book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        let history = self
            .stock_adjustment_query()
            .find_by_book_id(&mut connection, &id)
            .await?;
        Ok(history.into_iter().map(StockAdjustmentDto::from).collect())
    }
}

impl<T> StockHistoryService for T where T: DependOnBookQuery + DependOnStockAdjustmentQuery {}
