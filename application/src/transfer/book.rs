use error_stack::Report;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::BookFilter;
use kernel::prelude::entity::{
    Book, BookAuthor, BookGenre, BookTitle, DestructBook, Isbn, Money, Publisher, SelectLimit,
    SelectOffset, Seller, StockQuantity,
};
use kernel::KernelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub seller: Option<String>,
    pub price: Money,
    pub stock: i32,
    pub is_deleted: bool,
    pub created_at: OffsetDateTime,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
            genre,
            publisher,
            seller,
            price,
            stock,
            is_deleted,
            created_at,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.map(Into::into),
            genre: genre.map(Into::into),
            publisher: publisher.map(Into::into),
            seller: seller.map(Into::into),
            price,
            stock: stock.into(),
            is_deleted: is_deleted.into(),
            created_at: created_at.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct ListBooksDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub in_stock_only: bool,
    pub max_stock: Option<i32>,
    pub include_deleted: bool,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

impl TryFrom<ListBooksDto> for BookFilter {
    type Error = Report<KernelError>;
    fn try_from(value: ListBooksDto) -> Result<Self, Self::Error> {
        let max_stock = value
            .max_stock
            .map(|max| {
                StockQuantity::try_new(max).ok_or_else(|| {
                    Report::new(KernelError::Validation)
                        .attach_printable(format!("max_stock must not be negative: {max}"))
                })
            })
            .transpose()?;
        let limit = value
            .limit
            .map(|limit| {
                SelectLimit::try_new(limit).ok_or_else(|| {
                    Report::new(KernelError::Validation)
                        .attach_printable(format!("limit must not be negative: {limit}"))
                })
            })
            .transpose()?
            .unwrap_or_default();
        let offset = value
            .offset
            .map(|offset| {
                SelectOffset::try_new(offset).ok_or_else(|| {
                    Report::new(KernelError::Validation)
                        .attach_printable(format!("offset must not be negative: {offset}"))
                })
            })
            .transpose()?
            .unwrap_or_default();
        Ok(BookFilter {
            title: value.title,
            author: value.author,
            genre: value.genre.map(BookGenre::new),
            in_stock_only: value.in_stock_only,
            max_stock,
            include_deleted: value.include_deleted,
            limit,
            offset,
        })
    }
}

pub struct RegisterBookDto {
    pub actor: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub seller: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Default)]
pub struct UpdateBookDto {
    pub actor: Uuid,
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub seller: Option<String>,
    pub price: Option<Decimal>,
}

pub struct DeleteBookDto {
    pub actor: Uuid,
    pub id: Uuid,
}

pub(crate) fn required_text(field: &str, value: String) -> error_stack::Result<String, KernelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn price(value: Decimal) -> error_stack::Result<Money, KernelError> {
    let price = Money::from_decimal(value).ok_or_else(|| {
        Report::new(KernelError::Validation).attach_printable(format!("Price out of range: {value}"))
    })?;
    if price.is_negative() {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("Price must not be negative: {value}")));
    }
    Ok(price)
}

pub(crate) fn title(value: String) -> error_stack::Result<BookTitle, KernelError> {
    required_text("title", value).map(BookTitle::new)
}

pub(crate) fn author(value: String) -> error_stack::Result<BookAuthor, KernelError> {
    required_text("author", value).map(BookAuthor::new)
}

pub(crate) fn isbn(value: Option<String>) -> Option<Isbn> {
    optional_text(value).map(Isbn::new)
}

pub(crate) fn genre(value: Option<String>) -> Option<BookGenre> {
    optional_text(value).map(BookGenre::new)
}

pub(crate) fn publisher(value: Option<String>) -> Option<Publisher> {
    optional_text(value).map(Publisher::new)
}

pub(crate) fn seller(value: Option<String>) -> Option<Seller> {
    optional_text(value).map(Seller::new)
}
