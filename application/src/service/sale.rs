use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery, DependOnSaleQuery, SaleQuery};
use kernel::interface::update::{DependOnSaleModifier, SaleModifier};
use kernel::prelude::entity::{
    AdjustmentReason, Book, BookId, Cart, CreatedAt, Money, Payment, Permission, Sale, SaleId,
    SaleItem, StockDelta, UserId,
};
use kernel::KernelError;

use crate::service::{ApplyStockAdjustment, Authorize};
use crate::transfer::{CheckoutDto, GetSaleDto, SaleDto};

fn stock_changed(book_id: &BookId, reason: &str) -> Report<KernelError> {
    Report::new(KernelError::StockChanged)
        .attach(book_id.clone())
        .attach_printable(format!("Book {book_id}: {reason}"))
}

#[async_trait::async_trait]
pub trait CheckoutService:
    'static + Sync + Send + Authorize + ApplyStockAdjustment + DependOnBookQuery + DependOnSaleModifier
{
    /// Commits the cart as one sale or changes nothing at all.
    ///
    /// Every touched book is locked in ascending id order and re-checked
    /// against the cart before anything is written. The cart is cleared only
    /// after the sale is committed.
    #[tracing::instrument(skip_all)]
    async fn checkout(
        &self,
        cart: &mut Cart,
        dto: CheckoutDto,
    ) -> error_stack::Result<SaleDto, KernelError> {
        if cart.is_empty() {
            tracing::warn!("Rejected checkout of an empty cart");
            return Err(Report::new(KernelError::EmptyCart));
        }
        let total = cart.total()?;
        let tendered = Money::from_decimal(dto.tendered).ok_or_else(|| {
            Report::new(KernelError::Validation)
                .attach_printable(format!("Tendered amount out of range: {}", dto.tendered))
        })?;
        let payment = Payment::settle(dto.method, tendered, dto.authorization, total)
            .map_err(|report| {
                tracing::warn!(method = %dto.method, %total, %tendered, "Rejected payment");
                report
            })?;
        let cashier = UserId::new(dto.cashier);

        let mut connection = self.database_connection().transact().await?;
        let result = async {
            self.authorize(&mut connection, &cashier, Permission::ProcessSales)
                .await?;

            let mut lines = cart.lines().to_vec();
            lines.sort_by(|a, b| a.book_id().cmp(b.book_id()));
            let mut locked = Vec::with_capacity(lines.len());
            for line in &lines {
                let book = self
                    .book_query()
                    .find_for_update(&mut connection, line.book_id())
                    .await?
                    .filter(Book::is_available)
                    .ok_or_else(|| stock_changed(line.book_id(), "no longer for sale"))?;
                if !book.stock().covers(line.quantity()) {
                    return Err(stock_changed(
                        line.book_id(),
                        &format!(
                            "{} requested but {} left",
                            line.quantity().value(),
                            book.stock().value()
                        ),
                    ));
                }
                locked.push(book);
            }

            let sale = Sale::new(
                SaleId::new(Uuid::new_v4()),
                CreatedAt::now(),
                Some(cashier.clone()),
                cart.lines().iter().map(SaleItem::from).collect(),
                payment,
            )?;
            self.sale_modifier().create(&mut connection, &sale).await?;

            for (book, line) in locked.into_iter().zip(&lines) {
                self.apply_adjustment(
                    &mut connection,
                    book,
                    StockDelta::removal(line.quantity()),
                    AdjustmentReason::Sale,
                    Some(cashier.clone()),
                    Some(sale.id().clone()),
                )
                .await
                .map_err(|report| {
                    report
                        .attach(line.book_id().clone())
                        .change_context(KernelError::StockChanged)
                })?;
            }
            Ok::<_, Report<KernelError>>(sale)
        }
        .await;

        match result {
            Ok(sale) => {
                connection.commit().await?;
                cart.clear();
                tracing::info!(
                    sale_id = %Uuid::from(sale.id().clone()),
                    total = %sale.total(),
                    change = %sale.payment().change(),
                    units = sale.units(),
                    "Committed sale"
                );
                Ok(SaleDto::from(sale))
            }
            Err(report) => {
                if let Err(rollback) = connection.roll_back().await {
                    tracing::error!("Failed to roll back checkout: {rollback:?}");
                }
                tracing::warn!(kind = report.current_context().kind(), "Rejected checkout");
                Err(report)
            }
        }
    }
}

impl<T> CheckoutService for T where
    T: Authorize + ApplyStockAdjustment + DependOnBookQuery + DependOnSaleModifier
{
}

#[async_trait::async_trait]
pub trait GetSaleService: 'static + Sync + Send + DependOnSaleQuery {
    async fn get_sale(&self, dto: GetSaleDto) -> error_stack::Result<SaleDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = SaleId::new(dto.id);
        let sale = self
            .sale_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!("Sale {} not found", dto.id))
            })?;
        Ok(SaleDto::from(sale))
    }
}

impl<T> GetSaleService for T where T: DependOnSaleQuery {}
