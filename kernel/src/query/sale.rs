use time::OffsetDateTime;

use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Sale, SaleId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait SaleQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &SaleId,
    ) -> error_stack::Result<Option<Sale>, KernelError>;

    /// Sales with `from <= sold_at < to`, oldest first.
    async fn find_between(
        &self,
        con: &mut Self::Transaction,
        from: &OffsetDateTime,
        to: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Sale>, KernelError>;
}

pub trait DependOnSaleQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type SaleQuery: SaleQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn sale_query(&self) -> &Self::SaleQuery;
}
