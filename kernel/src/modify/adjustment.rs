use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::StockAdjustment;
use crate::KernelError;

/// Append-only stock ledger. There is intentionally no update or delete.
#[async_trait::async_trait]
pub trait StockAdjustmentModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn record(
        &self,
        con: &mut Self::Transaction,
        adjustment: &StockAdjustment,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnStockAdjustmentModifier:
    'static + Sync + Send + DependOnDatabaseConnection
{
    type StockAdjustmentModifier: StockAdjustmentModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn stock_adjustment_modifier(&self) -> &Self::StockAdjustmentModifier;
}
