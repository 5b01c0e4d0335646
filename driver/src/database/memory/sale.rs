use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::query::SaleQuery;
use kernel::interface::update::SaleModifier;
use kernel::prelude::entity::{Sale, SaleId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemorySaleRepository;

#[async_trait::async_trait]
impl SaleQuery for InMemorySaleRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &SaleId,
    ) -> error_stack::Result<Option<Sale>, KernelError> {
        Ok(con
            .state()
            .sales
            .iter()
            .find(|sale| sale.id() == id)
            .cloned())
    }

    async fn find_between(
        &self,
        con: &mut InMemoryTransaction,
        from: &OffsetDateTime,
        to: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Sale>, KernelError> {
        let mut sales = con
            .state()
            .sales
            .iter()
            .filter(|sale| {
                let sold_at: &OffsetDateTime = sale.sold_at().as_ref();
                from <= sold_at && sold_at < to
            })
            .cloned()
            .collect::<Vec<_>>();
        sales.sort_by_key(|sale| {
            let sold_at: &OffsetDateTime = sale.sold_at().as_ref();
            *sold_at
        });
        Ok(sales)
    }
}

#[async_trait::async_trait]
impl SaleModifier for InMemorySaleRepository {
    type Transaction = InMemoryTransaction;
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        sale: &Sale,
    ) -> error_stack::Result<(), KernelError> {
        let state = con.state_mut();
        if state.sales.iter().any(|stored| stored.id() == sale.id()) {
            return Err(Report::new(KernelError::Validation).attach_printable("Sale already exists"));
        }
        state.sales.push(sale.clone());
        Ok(())
    }
}
