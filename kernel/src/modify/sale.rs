use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::Sale;
use crate::KernelError;

#[async_trait::async_trait]
pub trait SaleModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Inserts the header and every item. Sales are never updated afterwards.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        sale: &Sale,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnSaleModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type SaleModifier: SaleModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn sale_modifier(&self) -> &Self::SaleModifier;
}
