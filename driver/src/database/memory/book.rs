use error_stack::Report;

use kernel::interface::query::{BookFilter, BookQuery};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId, StockQuantity};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con
            .state()
            .books
            .iter()
            .find(|book| book.id() == id)
            .cloned())
    }

    async fn find_for_update(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let limit = filter.limit.value();
        let offset = filter.offset.value();
        let mut books = con
            .state()
            .books
            .iter()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect::<Vec<_>>();
        books.sort_by(|a, b| {
            let (left, right): (&String, &String) = (a.title().as_ref(), b.title().as_ref());
            left.cmp(right).then_with(|| a.id().cmp(b.id()))
        });
        Ok(books
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or_default())
            .take(usize::try_from(limit).unwrap_or_default())
            .collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let state = con.state_mut();
        if state.book_mut(book.id()).is_some() {
            return Err(Report::new(KernelError::Validation)
                .attach(book.id().clone())
                .attach_printable("Book already exists"));
        }
        state.books.push(book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.state_mut().book_mut(book.id()) {
            let stock = *stored.stock();
            *stored = book.clone().with_stock(stock);
        }
        Ok(())
    }

    async fn update_stock(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
        stock: &StockQuantity,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.state_mut().book_mut(book_id) {
            *stored = stored.clone().with_stock(*stock);
        }
        Ok(())
    }
}
