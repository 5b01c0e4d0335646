use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::gate::{DependOnPermissionGate, PermissionGate};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnStockAdjustmentModifier, StockAdjustmentModifier,
};
use kernel::prelude::entity::{
    AdjustmentId, AdjustmentReason, Book, CreatedAt, Permission, SaleId, StockAdjustment,
    StockDelta, UserId,
};
use kernel::KernelError;

pub use self::{book::*, cart::*, report::*, sale::*, stock::*, user::*};

mod book;
mod cart;
mod report;
mod sale;
mod stock;
mod user;

/// Turns a denied permission check into [`KernelError::PermissionDenied`].
#[async_trait::async_trait]
pub trait Authorize: 'static + Sync + Send + DependOnPermissionGate {
    async fn authorize(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        actor: &UserId,
        permission: Permission,
    ) -> error_stack::Result<(), KernelError> {
        let allowed = self
            .permission_gate()
            .has_permission(con, actor, permission)
            .await?;
        if !allowed {
            return Err(Report::new(KernelError::PermissionDenied)
                .attach(actor.clone())
                .attach(permission)
                .attach_printable(format!("Missing permission {permission:?}")));
        }
        Ok(())
    }
}

impl<T> Authorize for T where T: DependOnPermissionGate {}

/// The only routine that moves stock. It runs inside the caller's transaction
/// against a book the caller already holds, writes the new balance and appends
/// the matching ledger entry.
#[async_trait::async_trait]
pub trait ApplyStockAdjustment:
    'static + Sync + Send + DependOnBookModifier + DependOnStockAdjustmentModifier
{
    async fn apply_adjustment(
        &self,
        con: &mut <Self::DatabaseConnection as DatabaseConnection>::Transaction,
        book: Book,
        delta: StockDelta,
        reason: AdjustmentReason,
        operator: Option<UserId>,
        sale_id: Option<SaleId>,
    ) -> error_stack::Result<Book, KernelError> {
        let balance = book.stock().apply(&delta).ok_or_else(|| {
            Report::new(KernelError::InsufficientStock)
                .attach(book.id().clone())
                .attach_printable(format!(
                    "Stock {} cannot absorb a change of {}",
                    book.stock().value(),
                    delta.value()
                ))
        })?;
        self.book_modifier()
            .update_stock(con, book.id(), &balance)
            .await?;
        let adjustment = StockAdjustment::new(
            AdjustmentId::new(Uuid::new_v4()),
            book.id().clone(),
            delta,
            reason,
            balance,
            operator,
            sale_id,
            CreatedAt::now(),
        );
        self.stock_adjustment_modifier()
            .record(con, &adjustment)
            .await?;
        Ok(book.with_stock(balance))
    }
}

impl<T> ApplyStockAdjustment for T where
    T: DependOnBookModifier + DependOnStockAdjustmentModifier
{
}
