use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookFilter, BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    AdjustmentReason, Book, BookId, BookPatch, CreatedAt, IsDeleted, Permission, StockDelta,
    StockQuantity, UserId,
};
use kernel::KernelError;

use crate::service::{ApplyStockAdjustment, Authorize};
use crate::transfer::{
    author, genre, isbn, price, publisher, seller, title, AdjustStockDto, BookDto, DeleteBookDto,
    GetBookDto, ListBooksDto, RegisterBookDto, UpdateBookDto,
};

fn not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach(id.clone())
        .attach_printable(format!("Book {id} not found"))
}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = BookId::new(dto.id);
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .filter(Book::is_available)
            .ok_or_else(|| not_found(&id))?;
        Ok(BookDto::from(book))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait ListBooksService: 'static + Sync + Send + DependOnBookQuery {
    async fn list_books(&self, dto: ListBooksDto) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let filter = BookFilter::try_from(dto)?;
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection, &filter).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> ListBooksService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait RegisterBookService:
    'static + Sync + Send + Authorize + ApplyStockAdjustment
{
    #[tracing::instrument(skip_all)]
    async fn register_book(&self, dto: RegisterBookDto) -> error_stack::Result<BookDto, KernelError> {
        let actor = UserId::new(dto.actor);
        let title = title(dto.title)?;
        let author = author(dto.author)?;
        let price = price(dto.price)?;
        if dto.quantity < 0 {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Initial quantity must not be negative: {}", dto.quantity)));
        }

        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &actor, Permission::ManageCatalog)
            .await?;

        let mut book = Book::new(
            BookId::new(Uuid::new_v4()),
            title,
            author,
            isbn(dto.isbn),
            genre(dto.genre),
            publisher(dto.publisher),
            seller(dto.seller),
            price,
            StockQuantity::default(),
            IsDeleted::new(false),
            CreatedAt::now(),
        );
        self.book_modifier().create(&mut connection, &book).await?;
        if dto.quantity > 0 {
            book = self
                .apply_adjustment(
                    &mut connection,
                    book,
                    StockDelta::new(dto.quantity),
                    AdjustmentReason::Restock,
                    Some(actor),
                    None,
                )
                .await?;
        }
        connection.commit().await?;
        tracing::info!(book_id = %book.id(), stock = book.stock().value(), "Registered book");
        Ok(BookDto::from(book))
    }
}

impl<T> RegisterBookService for T where T: Authorize + ApplyStockAdjustment {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + Authorize + DependOnBookQuery + DependOnBookModifier
{
    #[tracing::instrument(skip_all)]
    async fn update_book(&self, dto: UpdateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let actor = UserId::new(dto.actor);
        let id = BookId::new(dto.id);
        let patch = BookPatch {
            title: dto.title.map(title).transpose()?,
            author: dto.author.map(author).transpose()?,
            isbn: isbn(dto.isbn),
            genre: genre(dto.genre),
            publisher: publisher(dto.publisher),
            seller: seller(dto.seller),
            price: dto.price.map(price).transpose()?,
        };

        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &actor, Permission::ManageCatalog)
            .await?;
        let book = self
            .book_query()
            .find_for_update(&mut connection, &id)
            .await?
            .filter(Book::is_available)
            .ok_or_else(|| not_found(&id))?;
        if patch.is_empty() {
            return Ok(BookDto::from(book));
        }
        let book = book.patched(patch);
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;
        Ok(BookDto::from(book))
    }
}

impl<T> UpdateBookService for T where T: Authorize + DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static + Sync + Send + Authorize + DependOnBookQuery + DependOnBookModifier
{
    #[tracing::instrument(skip_all)]
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let actor = UserId::new(dto.actor);
        let id = BookId::new(dto.id);
        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &actor, Permission::ManageCatalog)
            .await?;
        let book = self
            .book_query()
            .find_for_update(&mut connection, &id)
            .await?
            .filter(Book::is_available)
            .ok_or_else(|| not_found(&id))?;
        self.book_modifier()
            .update(&mut connection, &book.soft_deleted())
            .await?;
        connection.commit().await?;
        tracing::info!(book_id = %id, "Deleted book");
        Ok(())
    }
}

impl<T> DeleteBookService for T where T: Authorize + DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait AdjustStockService:
    'static + Sync + Send + Authorize + DependOnBookQuery + ApplyStockAdjustment
{
    #[tracing::instrument(skip_all)]
    async fn adjust_stock(&self, dto: AdjustStockDto) -> error_stack::Result<BookDto, KernelError> {
        let actor = UserId::new(dto.actor);
        let id = BookId::new(dto.book_id);
        let delta = StockDelta::new(dto.delta);
        if delta.is_zero() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable("Stock adjustment must change the stock"));
        }
        let permission = dto.reason.required_permission().ok_or_else(|| {
            Report::new(KernelError::Validation)
                .attach_printable(format!("Reason {} is reserved for checkout", dto.reason))
        })?;

        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &actor, permission).await?;
        let book = self
            .book_query()
            .find_for_update(&mut connection, &id)
            .await?
            .filter(Book::is_available)
            .ok_or_else(|| not_found(&id))?;
        let book = self
            .apply_adjustment(&mut connection, book, delta, dto.reason, Some(actor), None)
            .await?;
        connection.commit().await?;
        tracing::info!(
            book_id = %id,
            delta = delta.value(),
            reason = %dto.reason,
            stock = book.stock().value(),
            "Adjusted stock"
        );
        Ok(BookDto::from(book))
    }
}

impl<T> AdjustStockService for T where T: Authorize + DependOnBookQuery + ApplyStockAdjustment {}
