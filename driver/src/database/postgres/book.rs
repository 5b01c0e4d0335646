use sqlx::{PgConnection, Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::{BookFilter, BookQuery};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookGenre, BookId, BookTitle, CreatedAt, IsDeleted, Isbn, Money, Publisher,
    Seller, StockQuantity,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id, false).await
    }

    async fn find_for_update(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id, true).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con, filter).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn update_stock(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        stock: &StockQuantity,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update_stock(con, book_id, stock).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    isbn: Option<String>,
    genre: Option<String>,
    publisher: Option<String>,
    seller: Option<String>,
    price_cents: i64,
    stock: i32,
    is_deleted: bool,
    created_at: OffsetDateTime,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book::new(
            BookId::new(row.id),
            BookTitle::new(row.title),
            BookAuthor::new(row.author),
            row.isbn.map(Isbn::new),
            row.genre.map(BookGenre::new),
            row.publisher.map(Publisher::new),
            row.seller.map(Seller::new),
            Money::from_cents(row.price_cents),
            StockQuantity::new(row.stock),
            IsDeleted::new(row.is_deleted),
            CreatedAt::new(row.created_at),
        )
    }
}

fn optional(value: Option<&impl AsRef<String>>) -> Option<String> {
    value.map(|value| value.as_ref().clone())
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
        for_update: bool,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let query = if for_update {
            // language=postgresql
            r#"
            SELECT id, title, author, isbn, genre, publisher, seller, price_cents, stock, is_deleted, created_at
            FROM books
            WHERE id = $1
            FOR UPDATE
            "#
        } else {
            // language=postgresql
            r#"
            SELECT id, title, author, isbn, genre, publisher, seller, price_cents, stock, is_deleted, created_at
            FROM books
            WHERE id = $1
            "#
        };
        let row = sqlx::query_as::<_, BookRow>(query)
            .bind(id.as_ref())
            .fetch_optional(con)
            .await
            .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn find_all(
        con: &mut PgConnection,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            // language=postgresql
            r#"
            SELECT id, title, author, isbn, genre, publisher, seller, price_cents, stock, is_deleted, created_at
            FROM books
            WHERE TRUE
            "#,
        );
        if !filter.include_deleted {
            builder.push(" AND NOT is_deleted");
        }
        if let Some(title) = &filter.title {
            builder
                .push(" AND title ILIKE ")
                .push_bind(format!("%{}%", escape_like(title)));
        }
        if let Some(author) = &filter.author {
            builder
                .push(" AND author ILIKE ")
                .push_bind(format!("%{}%", escape_like(author)));
        }
        if let Some(genre) = &filter.genre {
            let genre: &String = genre.as_ref();
            builder.push(" AND genre = ").push_bind(genre.clone());
        }
        if filter.in_stock_only {
            builder.push(" AND stock > 0");
        }
        if let Some(max) = &filter.max_stock {
            builder.push(" AND stock <= ").push_bind(max.value());
        }
        let limit = filter.limit.value();
        let offset = filter.offset.value();
        builder
            .push(" ORDER BY title, id LIMIT ")
            .push_bind(i64::from(limit))
            .push(" OFFSET ")
            .push_bind(i64::from(offset));

        let rows = builder
            .build_query_as::<BookRow>()
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let title: &String = book.title().as_ref();
        let author: &String = book.author().as_ref();
        let created_at: &OffsetDateTime = book.created_at().as_ref();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, isbn, genre, publisher, seller, price_cents, stock, is_deleted, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(title)
        .bind(author)
        .bind(optional(book.isbn().as_ref()))
        .bind(optional(book.genre().as_ref()))
        .bind(optional(book.publisher().as_ref()))
        .bind(optional(book.seller().as_ref()))
        .bind(book.price().cents())
        .bind(book.stock().value())
        .bind(book.is_deleted().value())
        .bind(created_at)
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let title: &String = book.title().as_ref();
        let author: &String = book.author().as_ref();
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, isbn = $4, genre = $5, publisher = $6, seller = $7,
                price_cents = $8, is_deleted = $9
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(title)
        .bind(author)
        .bind(optional(book.isbn().as_ref()))
        .bind(optional(book.genre().as_ref()))
        .bind(optional(book.publisher().as_ref()))
        .bind(optional(book.seller().as_ref()))
        .bind(book.price().cents())
        .bind(book.is_deleted().value())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update_stock(
        con: &mut PgConnection,
        book_id: &BookId,
        stock: &StockQuantity,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET stock = $2
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .bind(stock.value())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
