use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::gate::{DependOnPermissionGate, RoleGate};
use kernel::interface::query::{
    DependOnBookQuery, DependOnSaleQuery, DependOnStockAdjustmentQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnSaleModifier, DependOnStockAdjustmentModifier,
    DependOnUserModifier,
};
use kernel::prelude::entity::{Book, BookId, Sale, StockAdjustment, User};
use kernel::KernelError;

pub use self::{adjustment::*, book::*, sale::*, user::*};

mod adjustment;
mod book;
mod sale;
mod user;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct MemoryState {
    books: Vec<Book>,
    sales: Vec<Sale>,
    adjustments: Vec<StockAdjustment>,
    users: Vec<User>,
}

impl MemoryState {
    fn book_mut(&mut self, id: &BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id() == id)
    }
}

/// Process-local store. A transaction holds the whole store exclusively and
/// works on a copy that only replaces the shared state on commit, so
/// transactions are serializable and a dropped one leaves no trace.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
    gate: RoleGate<InMemoryUserRepository>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

impl InMemoryTransaction {
    pub(in crate::database) fn state(&self) -> &MemoryState {
        &self.working
    }

    pub(in crate::database) fn state_mut(&mut self) -> &mut MemoryState {
        &mut self.working
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryTransaction { guard, working })
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let InMemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnSaleQuery for InMemoryDatabase {
    type SaleQuery = InMemorySaleRepository;
    fn sale_query(&self) -> &Self::SaleQuery {
        &InMemorySaleRepository
    }
}

impl DependOnSaleModifier for InMemoryDatabase {
    type SaleModifier = InMemorySaleRepository;
    fn sale_modifier(&self) -> &Self::SaleModifier {
        &InMemorySaleRepository
    }
}

impl DependOnStockAdjustmentQuery for InMemoryDatabase {
    type StockAdjustmentQuery = InMemoryStockAdjustmentRepository;
    fn stock_adjustment_query(&self) -> &Self::StockAdjustmentQuery {
        &InMemoryStockAdjustmentRepository
    }
}

impl DependOnStockAdjustmentModifier for InMemoryDatabase {
    type StockAdjustmentModifier = InMemoryStockAdjustmentRepository;
    fn stock_adjustment_modifier(&self) -> &Self::StockAdjustmentModifier {
        &InMemoryStockAdjustmentRepository
    }
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl DependOnUserModifier for InMemoryDatabase {
    type UserModifier = InMemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserRepository
    }
}

impl DependOnPermissionGate for InMemoryDatabase {
    type PermissionGate = RoleGate<InMemoryUserRepository>;
    fn permission_gate(&self) -> &Self::PermissionGate {
        &self.gate
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookId, BookTitle, CreatedAt, IsDeleted, Money, StockQuantity,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    fn book() -> Book {
        Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("memory"),
            BookAuthor::new("author"),
            None,
            None,
            None,
            None,
            Money::from_cents(100),
            StockQuantity::new(1),
            IsDeleted::new(false),
            CreatedAt::now(),
        )
    }

    #[tokio::test]
    async fn dropped_transaction_leaves_no_trace() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let book = book();
        {
            let mut con = db.transact().await?;
            InMemoryBookRepository.create(&mut con, &book).await?;
        }
        let mut con = db.transact().await?;
        assert!(InMemoryBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .is_none());
        con.roll_back().await?;

        let mut con = db.transact().await?;
        InMemoryBookRepository.create(&mut con, &book).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        assert!(InMemoryBookRepository
            .find_by_id(&mut con, book.id())
            .await?
            .is_some());
        Ok(())
    }
}
