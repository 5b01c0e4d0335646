use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookGenre, BookId, SelectLimit, SelectOffset, StockQuantity};
use crate::KernelError;

/// Catalog listing filter. Text fields match case-insensitive substrings.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BookFilter {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<BookGenre>,
    pub in_stock_only: bool,
    pub max_stock: Option<StockQuantity>,
    pub include_deleted: bool,
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        fn contains(haystack: &str, needle: Option<&String>) -> bool {
            needle.map_or(true, |needle| {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            })
        }
        let title: &String = book.title().as_ref();
        let author: &String = book.author().as_ref();
        (self.include_deleted || book.is_available())
            && contains(title, self.title.as_ref())
            && contains(author, self.author.as_ref())
            && self
                .genre
                .as_ref()
                .map_or(true, |genre| book.genre().as_ref() == Some(genre))
            && (!self.in_stock_only || book.stock().value() > 0)
            && self.max_stock.map_or(true, |max| *book.stock() <= max)
    }
}

#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    /// Reads the book and holds it against concurrent writers until the
    /// transaction ends.
    async fn find_for_update(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
