use std::sync::Arc;

use error_stack::Report;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use application::service::{
    AddToCartService, CheckoutService, DeleteBookService, GetBookService, GetSaleService,
    ReconcileStockService, SalesSummaryService,
};
use application::transfer::{
    AddToCartDto, CheckoutDto, DeleteBookDto, GetBookDto, GetSaleDto, ReconcileStockDto,
    SalesReportDto,
};
use driver::database::{
    InMemoryBookRepository, InMemoryDatabase, InMemorySaleRepository,
    InMemoryStockAdjustmentRepository, InMemoryTransaction, InMemoryUserRepository,
};
use kernel::interface::database::DatabaseConnection;
use kernel::interface::gate::{DependOnPermissionGate, RoleGate};
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnSaleModifier, DependOnStockAdjustmentModifier,
};
use kernel::prelude::entity::{Book, BookId, Cart, Money, PaymentMethod, StockQuantity};
use kernel::KernelError;

mod common;

use common::{book, cash, fixture};

fn add(book_id: Uuid, quantity: i32) -> AddToCartDto {
    AddToCartDto { book_id, quantity }
}

/// Book store whose stock write fails for one book.
struct StockWriteFails {
    fail_on: BookId,
}

#[async_trait::async_trait]
impl BookModifier for StockWriteFails {
    type Transaction = InMemoryTransaction;
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        InMemoryBookRepository.create(con, book).await
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        InMemoryBookRepository.update(con, book).await
    }

    async fn update_stock(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
        stock: &StockQuantity,
    ) -> error_stack::Result<(), KernelError> {
        if book_id == &self.fail_on {
            return Err(Report::new(KernelError::Internal).attach_printable("stock write refused"));
        }
        InMemoryBookRepository.update_stock(con, book_id, stock).await
    }
}

/// Shares the store of `inner` but refuses the stock write for one book.
struct FailingStockDatabase {
    inner: InMemoryDatabase,
    books: StockWriteFails,
}

#[async_trait::async_trait]
impl DatabaseConnection for FailingStockDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        self.inner.transact().await
    }
}

impl DependOnBookQuery for FailingStockDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for FailingStockDatabase {
    type BookModifier = StockWriteFails;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.books
    }
}

impl DependOnSaleModifier for FailingStockDatabase {
    type SaleModifier = InMemorySaleRepository;
    fn sale_modifier(&self) -> &Self::SaleModifier {
        &InMemorySaleRepository
    }
}

impl DependOnStockAdjustmentModifier for FailingStockDatabase {
    type StockAdjustmentModifier = InMemoryStockAdjustmentRepository;
    fn stock_adjustment_modifier(&self) -> &Self::StockAdjustmentModifier {
        &InMemoryStockAdjustmentRepository
    }
}

impl DependOnPermissionGate for FailingStockDatabase {
    type PermissionGate = RoleGate<InMemoryUserRepository>;
    fn permission_gate(&self) -> &Self::PermissionGate {
        self.inner.permission_gate()
    }
}

#[tokio::test]
async fn two_line_cash_sale() {
    let fx = fixture().await;
    let first = book(&fx.db, fx.admin, 1299, 50).await;
    let second = book(&fx.db, fx.admin, 1450, 40).await;

    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(first.id, 2)).await.unwrap();
    let view = fx.db.add_to_cart(&mut cart, add(second.id, 1)).await.unwrap();
    assert_eq!(view.total, Money::from_cents(4048));

    let sale = fx.db.checkout(&mut cart, cash(fx.cashier, 5000)).await.unwrap();
    assert_eq!(sale.total, Money::from_cents(4048));
    assert_eq!(sale.change, Money::from_cents(952));
    assert_eq!(sale.change.to_string(), "9.52");
    assert_eq!(sale.cashier, Some(fx.cashier));
    assert!(cart.is_empty());

    let first = fx.db.get_book(GetBookDto { id: first.id }).await.unwrap();
    assert_eq!(first.stock, 48);
    let second = fx.db.get_book(GetBookDto { id: second.id }).await.unwrap();
    assert_eq!(second.stock, 39);

    for id in [first.id, second.id] {
        let reconciliation = fx.db.reconcile(ReconcileStockDto { book_id: id }).await.unwrap();
        assert!(reconciliation.is_consistent());
    }
}

#[tokio::test]
async fn stored_sale_matches_returned_sale() {
    let fx = fixture().await;
    let first = book(&fx.db, fx.admin, 999, 5).await;
    let second = book(&fx.db, fx.admin, 2505, 5).await;
    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(first.id, 3)).await.unwrap();
    fx.db.add_to_cart(&mut cart, add(second.id, 2)).await.unwrap();

    let sale = fx.db.checkout(&mut cart, cash(fx.cashier, 10000)).await.unwrap();
    let stored = fx.db.get_sale(GetSaleDto { id: sale.id }).await.unwrap();
    assert_eq!(stored, sale);

    let recomputed = stored
        .items
        .iter()
        .map(|item| item.unit_price.checked_mul(i64::from(item.quantity)).unwrap())
        .try_fold(Money::ZERO, Money::checked_add);
    assert_eq!(recomputed, Some(stored.total));
    assert_eq!(stored.total, Money::from_cents(8007));
}

#[tokio::test]
async fn over_stock_add_leaves_cart_empty() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1000, 10).await;
    let mut cart = Cart::new();
    let report = fx.db.add_to_cart(&mut cart, add(book.id, 11)).await.unwrap_err();
    assert_eq!(report.current_context(), &KernelError::InsufficientStock);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn non_positive_quantity_is_rejected() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1000, 10).await;
    let mut cart = Cart::new();
    for quantity in [0, -1] {
        let report = fx
            .db
            .add_to_cart(&mut cart, add(book.id, quantity))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
    let report = fx
        .db
        .add_to_cart(&mut cart, add(Uuid::new_v4(), 1))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn empty_cart_writes_nothing() {
    let fx = fixture().await;
    let mut cart = Cart::new();
    let report = fx.db.checkout(&mut cart, cash(fx.cashier, 100)).await.unwrap_err();
    assert_eq!(report.current_context(), &KernelError::EmptyCart);

    let now = OffsetDateTime::now_utc();
    let summary = fx
        .db
        .sales_summary(SalesReportDto {
            actor: fx.admin,
            from: now - Duration::hours(1),
            to: now + Duration::hours(1),
        })
        .await
        .unwrap();
    assert_eq!(summary.sale_count, 0);
}

#[tokio::test]
async fn short_cash_keeps_cart_and_stock() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1299, 3).await;
    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(book.id, 2)).await.unwrap();

    let report = fx.db.checkout(&mut cart, cash(fx.cashier, 2597)).await.unwrap_err();
    assert_eq!(report.current_context(), &KernelError::InsufficientPayment);
    assert!(!cart.is_empty());
    let book = fx.db.get_book(GetBookDto { id: book.id }).await.unwrap();
    assert_eq!(book.stock, 3);

    let sale = fx.db.checkout(&mut cart, cash(fx.cashier, 2598)).await.unwrap();
    assert_eq!(sale.change, Money::ZERO);
}

#[tokio::test]
async fn card_payment_needs_authorization() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1500, 3).await;
    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(book.id, 1)).await.unwrap();

    let report = fx
        .db
        .checkout(
            &mut cart,
            CheckoutDto {
                cashier: fx.cashier,
                tendered: Decimal::ZERO,
                method: PaymentMethod::Card,
                authorization: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::Validation);

    let sale = fx
        .db
        .checkout(
            &mut cart,
            CheckoutDto {
                cashier: fx.cashier,
                tendered: Decimal::ZERO,
                method: PaymentMethod::Card,
                authorization: Some("AUTH-123".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(sale.tendered, Money::from_cents(1500));
    assert_eq!(sale.change, Money::ZERO);
    assert_eq!(sale.authorization.as_deref(), Some("AUTH-123"));
}

#[tokio::test]
async fn unknown_cashier_is_denied() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1500, 3).await;
    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(book.id, 1)).await.unwrap();

    let report = fx
        .db
        .checkout(&mut cart, cash(Uuid::new_v4(), 1500))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::PermissionDenied);
    assert!(!cart.is_empty());
    let book = fx.db.get_book(GetBookDto { id: book.id }).await.unwrap();
    assert_eq!(book.stock, 3);
}

#[tokio::test]
async fn deleted_book_fails_checkout_with_its_id() {
    let fx = fixture().await;
    let kept = book(&fx.db, fx.admin, 500, 5).await;
    let dropped = book(&fx.db, fx.admin, 700, 5).await;
    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(kept.id, 1)).await.unwrap();
    fx.db.add_to_cart(&mut cart, add(dropped.id, 1)).await.unwrap();

    fx.db
        .delete_book(DeleteBookDto {
            actor: fx.manager,
            id: dropped.id,
        })
        .await
        .unwrap();

    let report = fx.db.checkout(&mut cart, cash(fx.cashier, 5000)).await.unwrap_err();
    assert_eq!(report.current_context(), &KernelError::StockChanged);
    assert_eq!(report.downcast_ref::<BookId>(), Some(&BookId::new(dropped.id)));

    let kept = fx.db.get_book(GetBookDto { id: kept.id }).await.unwrap();
    assert_eq!(kept.stock, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_checkouts_never_oversell() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 1000, 1).await;

    let db = Arc::new(fx.db);
    let mut handles = Vec::new();
    for _ in 0..2 {
        let mut cart = Cart::new();
        db.add_to_cart(&mut cart, add(book.id, 1)).await.unwrap();
        let db = Arc::clone(&db);
        let cashier = fx.cashier;
        handles.push(tokio::spawn(async move {
            db.checkout(&mut cart, cash(cashier, 1000)).await
        }));
    }

    let mut committed = 0;
    let mut changed = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => committed += 1,
            Err(report) => {
                assert_eq!(report.current_context(), &KernelError::StockChanged);
                changed += 1;
            }
        }
    }
    assert_eq!((committed, changed), (1, 1));

    let book = db.get_book(GetBookDto { id: book.id }).await.unwrap();
    assert_eq!(book.stock, 0);
    let reconciliation = db.reconcile(ReconcileStockDto { book_id: book.id }).await.unwrap();
    assert!(reconciliation.is_consistent());
}

#[tokio::test]
async fn failed_stock_write_rolls_back_the_whole_sale() {
    let fx = fixture().await;
    let first = book(&fx.db, fx.admin, 1299, 50).await;
    let second = book(&fx.db, fx.admin, 1450, 40).await;
    let mut cart = Cart::new();
    fx.db.add_to_cart(&mut cart, add(first.id, 2)).await.unwrap();
    fx.db.add_to_cart(&mut cart, add(second.id, 1)).await.unwrap();

    // Lines are written in ascending id order, so the larger id is the second write.
    let fail_on = BookId::new(first.id.max(second.id));
    let failing = FailingStockDatabase {
        inner: fx.db.clone(),
        books: StockWriteFails {
            fail_on: fail_on.clone(),
        },
    };

    let report = failing
        .checkout(&mut cart, cash(fx.cashier, 5000))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::StockChanged);
    assert_eq!(report.downcast_ref::<BookId>(), Some(&fail_on));
    assert_eq!(cart.lines().len(), 2);

    let now = OffsetDateTime::now_utc();
    let summary = fx
        .db
        .sales_summary(SalesReportDto {
            actor: fx.admin,
            from: now - Duration::hours(1),
            to: now + Duration::hours(1),
        })
        .await
        .unwrap();
    assert_eq!(summary.sale_count, 0);

    for (id, stock) in [(first.id, 50), (second.id, 40)] {
        let book = fx.db.get_book(GetBookDto { id }).await.unwrap();
        assert_eq!(book.stock, stock);
        let reconciliation = fx.db.reconcile(ReconcileStockDto { book_id: id }).await.unwrap();
        assert!(reconciliation.is_consistent());
        assert_eq!(reconciliation.drift, 0);
    }

    let sale = fx.db.checkout(&mut cart, cash(fx.cashier, 5000)).await.unwrap();
    assert_eq!(sale.total, Money::from_cents(4048));
}
