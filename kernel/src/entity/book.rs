mod author;
mod genre;
mod id;
mod isbn;
mod publisher;
mod seller;
mod stock;
mod title;

pub use self::{author::*, genre::*, id::*, isbn::*, publisher::*, seller::*, stock::*, title::*};
use crate::entity::{CreatedAt, IsDeleted, Money};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    isbn: Option<Isbn>,
    genre: Option<BookGenre>,
    publisher: Option<Publisher>,
    seller: Option<Seller>,
    price: Money,
    stock: StockQuantity,
    is_deleted: IsDeleted<Book>,
    created_at: CreatedAt<Book>,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        isbn: Option<Isbn>,
        genre: Option<BookGenre>,
        publisher: Option<Publisher>,
        seller: Option<Seller>,
        price: Money,
        stock: StockQuantity,
        is_deleted: IsDeleted<Book>,
        created_at: CreatedAt<Book>,
    ) -> Self {
        Self {
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
        }
    }

    pub fn is_available(&self) -> bool {
        !self.is_deleted.value()
    }
}

/// Partial update of the descriptive fields. Stock is deliberately absent:
/// it only moves through a logged stock adjustment.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BookPatch {
    pub title: Option<BookTitle>,
    pub author: Option<BookAuthor>,
    pub isbn: Option<Isbn>,
    pub genre: Option<BookGenre>,
    pub publisher: Option<Publisher>,
    pub seller: Option<Seller>,
    pub price: Option<Money>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Book {
    pub fn patched(self, patch: BookPatch) -> Self {
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
        } = self.into_destruct();
        Self::new(
            id,
            patch.title.unwrap_or(title),
            patch.author.unwrap_or(author),
            patch.isbn.or(isbn),
            patch.genre.or(genre),
            patch.publisher.or(publisher),
            patch.seller.or(seller),
            patch.price.unwrap_or(price),
            stock,
            is_deleted,
            created_at,
        )
    }

    pub fn with_stock(self, stock: StockQuantity) -> Self {
        self.reconstruct(|book| book.stock = stock)
    }

    pub fn soft_deleted(self) -> Self {
        self.reconstruct(|book| book.is_deleted = IsDeleted::new(true))
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{
        Book, BookAuthor, BookId, BookPatch, BookTitle, CreatedAt, IsDeleted, Money,
        StockQuantity,
    };

    fn book() -> Book {
        Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("Dune"),
            BookAuthor::new("Frank Herbert"),
            None,
            None,
            None,
            None,
            Money::from_cents(1299),
            StockQuantity::new(5),
            IsDeleted::new(false),
            CreatedAt::now(),
        )
    }

    #[test]
    fn patch_leaves_stock_untouched() {
        let original = book();
        let patched = original.clone().patched(BookPatch {
            title: Some(BookTitle::new("Dune Messiah")),
            price: Some(Money::from_cents(1450)),
            ..BookPatch::default()
        });
        assert_eq!(patched.title(), &BookTitle::new("Dune Messiah"));
        assert_eq!(patched.price(), &Money::from_cents(1450));
        assert_eq!(patched.author(), original.author());
        assert_eq!(patched.stock(), original.stock());
    }

    #[test]
    fn soft_delete_hides_book() {
        let book = book();
        assert!(book.is_available());
        assert!(!book.soft_deleted().is_available());
    }
}
