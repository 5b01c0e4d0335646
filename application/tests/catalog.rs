use rust_decimal::Decimal;
use uuid::Uuid;

use application::service::{
    DeleteBookService, GetBookService, ListBooksService, RegisterBookService, UpdateBookService,
};
use application::transfer::{
    DeleteBookDto, GetBookDto, ListBooksDto, RegisterBookDto, UpdateBookDto,
};
use kernel::prelude::entity::Money;
use kernel::KernelError;

mod common;

use common::{book, fixture};

fn register(actor: Uuid, title: &str, price: Decimal, quantity: i32) -> RegisterBookDto {
    RegisterBookDto {
        actor,
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        isbn: Some("978-0441013593".to_string()),
        genre: Some("sci-fi".to_string()),
        publisher: None,
        seller: Some("  ".to_string()),
        price,
        quantity,
    }
}

#[tokio::test]
async fn register_rounds_price_and_seeds_stock() {
    let fx = fixture().await;
    let book = fx
        .db
        .register_book(register(fx.manager, "  Dune  ", Decimal::new(12345, 3), 7))
        .await
        .unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.price, Money::from_cents(1235));
    assert_eq!(book.stock, 7);
    assert_eq!(book.seller, None);

    let found = fx.db.get_book(GetBookDto { id: book.id }).await.unwrap();
    assert_eq!(found, book);
}

#[tokio::test]
async fn register_rejects_invalid_input() {
    let fx = fixture().await;
    let cases = [
        register(fx.admin, " ", Decimal::new(100, 2), 1),
        register(fx.admin, "Dune", Decimal::new(-1, 2), 1),
        register(fx.admin, "Dune", Decimal::new(100, 2), -1),
    ];
    for dto in cases {
        let report = fx.db.register_book(dto).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
}

#[tokio::test]
async fn cashier_cannot_manage_catalog() {
    let fx = fixture().await;
    let report = fx
        .db
        .register_book(register(fx.cashier, "Dune", Decimal::new(100, 2), 1))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::PermissionDenied);

    let book = book(&fx.db, fx.admin, 100, 1).await;
    let report = fx
        .db
        .delete_book(DeleteBookDto {
            actor: fx.cashier,
            id: book.id,
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::PermissionDenied);
}

#[tokio::test]
async fn update_touches_details_only() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1299, 4).await;
    let updated = fx
        .db
        .update_book(UpdateBookDto {
            actor: fx.manager,
            id: book.id,
            title: Some("Dune Messiah".to_string()),
            price: Some(Decimal::new(1450, 2)),
            ..UpdateBookDto::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.price, Money::from_cents(1450));
    assert_eq!(updated.author, book.author);
    assert_eq!(updated.stock, 4);

    let report = fx
        .db
        .update_book(UpdateBookDto {
            actor: fx.manager,
            id: book.id,
            author: Some(" ".to_string()),
            ..UpdateBookDto::default()
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::Validation);
}

#[tokio::test]
async fn deleted_books_are_hidden() {
    let fx = fixture().await;
    let kept = book(&fx.db, fx.admin, 100, 1).await;
    let dropped = book(&fx.db, fx.admin, 100, 1).await;
    fx.db
        .delete_book(DeleteBookDto {
            actor: fx.admin,
            id: dropped.id,
        })
        .await
        .unwrap();

    let report = fx.db.get_book(GetBookDto { id: dropped.id }).await.unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);

    let listed = fx.db.list_books(ListBooksDto::default()).await.unwrap();
    assert!(listed.iter().any(|book| book.id == kept.id));
    assert!(listed.iter().all(|book| book.id != dropped.id));

    let everything = fx
        .db
        .list_books(ListBooksDto {
            include_deleted: true,
            ..ListBooksDto::default()
        })
        .await
        .unwrap();
    assert!(everything
        .iter()
        .any(|book| book.id == dropped.id && book.is_deleted));
}

#[tokio::test]
async fn list_filters_by_text_and_stock() {
    let fx = fixture().await;
    fx.db
        .register_book(register(fx.admin, "Dune", Decimal::new(100, 2), 3))
        .await
        .unwrap();
    fx.db
        .register_book(register(fx.admin, "Children of Dune", Decimal::new(100, 2), 0))
        .await
        .unwrap();
    fx.db
        .register_book(register(fx.admin, "Neuromancer", Decimal::new(100, 2), 3))
        .await
        .unwrap();

    let found = fx
        .db
        .list_books(ListBooksDto {
            title: Some("dune".to_string()),
            ..ListBooksDto::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 2);

    let found = fx
        .db
        .list_books(ListBooksDto {
            title: Some("dune".to_string()),
            in_stock_only: true,
            ..ListBooksDto::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Dune");

    let report = fx
        .db
        .list_books(ListBooksDto {
            limit: Some(-1),
            ..ListBooksDto::default()
        })
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::Validation);
}
