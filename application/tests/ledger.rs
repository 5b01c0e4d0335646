use rand::Rng;

use application::service::{
    AdjustStockService, GetBookService, ReconcileStockService, StockHistoryService,
};
use application::transfer::{AdjustStockDto, GetBookDto, ReconcileStockDto, StockHistoryDto};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{AdjustmentReason, BookId, StockQuantity};
use kernel::KernelError;

use driver::database::InMemoryBookRepository;

mod common;

use common::{book, fixture};

fn adjust(actor: uuid::Uuid, book_id: uuid::Uuid, delta: i32, reason: AdjustmentReason) -> AdjustStockDto {
    AdjustStockDto {
        actor,
        book_id,
        delta,
        reason,
    }
}

#[tokio::test]
async fn random_adjustments_keep_ledger_in_step() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 100, 5).await;
    let mut rng = rand::thread_rng();
    let mut expected = 5;

    for _ in 0..200 {
        let delta = rng.gen_range(-6..=6);
        let reason = match rng.gen_range(0..3) {
            0 => AdjustmentReason::Restock,
            1 => AdjustmentReason::Manual,
            _ => AdjustmentReason::Correction,
        };
        let result = fx
            .db
            .adjust_stock(adjust(fx.manager, book.id, delta, reason))
            .await;
        match result {
            Ok(updated) => {
                expected += delta;
                assert_eq!(updated.stock, expected);
            }
            Err(report) if delta == 0 => {
                assert_eq!(report.current_context(), &KernelError::Validation)
            }
            Err(report) => {
                assert!(expected + delta < 0);
                assert_eq!(report.current_context(), &KernelError::InsufficientStock);
            }
        }

        let reconciliation = fx
            .db
            .reconcile(ReconcileStockDto { book_id: book.id })
            .await
            .unwrap();
        assert_eq!(reconciliation.ledger_balance, i64::from(expected));
        assert_eq!(reconciliation.drift, 0);
    }

    let history = fx
        .db
        .stock_history(StockHistoryDto { book_id: book.id })
        .await
        .unwrap();
    let sum: i64 = history.iter().map(|entry| i64::from(entry.delta)).sum();
    assert_eq!(sum, i64::from(expected));
    assert_eq!(history.first().map(|entry| entry.reason), Some(AdjustmentReason::Restock));
    assert_eq!(history.last().map(|entry| entry.balance), Some(expected));
}

#[tokio::test]
async fn sale_reason_is_reserved() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 100, 5).await;
    let report = fx
        .db
        .adjust_stock(adjust(fx.admin, book.id, -1, AdjustmentReason::Sale))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::Validation);
}

#[tokio::test]
async fn cashier_cannot_adjust_stock() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 100, 5).await;
    for reason in [AdjustmentReason::Restock, AdjustmentReason::Manual] {
        let report = fx
            .db
            .adjust_stock(adjust(fx.cashier, book.id, 1, reason))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::PermissionDenied);
    }
    let book = fx.db.get_book(GetBookDto { id: book.id }).await.unwrap();
    assert_eq!(book.stock, 5);
}

#[tokio::test]
async fn unknown_book_is_not_found() {
    let fx = fixture().await;
    let report = fx
        .db
        .adjust_stock(adjust(
            fx.admin,
            uuid::Uuid::new_v4(),
            1,
            AdjustmentReason::Restock,
        ))
        .await
        .unwrap_err();
    assert_eq!(report.current_context(), &KernelError::NotFound);
}

#[tokio::test]
async fn reconcile_reports_drift() {
    let fx = fixture().await;
    let book = book(&fx.db, fx.admin, 100, 5).await;

    let mut con = fx.db.transact().await.unwrap();
    InMemoryBookRepository
        .update_stock(&mut con, &BookId::new(book.id), &StockQuantity::new(9))
        .await
        .unwrap();
    con.commit().await.unwrap();

    let reconciliation = fx
        .db
        .reconcile(ReconcileStockDto { book_id: book.id })
        .await
        .unwrap();
    assert_eq!(reconciliation.ledger_balance, 5);
    assert_eq!(reconciliation.stock, 9);
    assert_eq!(reconciliation.drift, 4);
    assert!(!reconciliation.is_consistent());
}
