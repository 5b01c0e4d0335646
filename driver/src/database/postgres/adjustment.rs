use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::StockAdjustmentQuery;
use kernel::interface::update::StockAdjustmentModifier;
use kernel::prelude::entity::{
    AdjustmentId, AdjustmentReason, BookId, CreatedAt, SaleId, StockAdjustment, StockDelta,
    StockQuantity, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresStockAdjustmentRepository;

#[async_trait::async_trait]
impl StockAdjustmentQuery for PostgresStockAdjustmentRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<StockAdjustment>, KernelError> {
        PgStockAdjustmentInternal::find_by_book_id(con, book_id).await
    }

    async fn sum_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        PgStockAdjustmentInternal::sum_by_book_id(con, book_id).await
    }
}

#[async_trait::async_trait]
impl StockAdjustmentModifier for PostgresStockAdjustmentRepository {
    type Transaction = PostgresTransaction;
    async fn record(
        &self,
        con: &mut PostgresTransaction,
        adjustment: &StockAdjustment,
    ) -> error_stack::Result<(), KernelError> {
        PgStockAdjustmentInternal::record(con, adjustment).await
    }
}

#[derive(sqlx::FromRow)]
struct StockAdjustmentRow {
    id: Uuid,
    book_id: Uuid,
    delta: i32,
    reason: String,
    balance: i32,
    operator: Option<Uuid>,
    sale_id: Option<Uuid>,
    created_at: OffsetDateTime,
}

impl TryFrom<StockAdjustmentRow> for StockAdjustment {
    type Error = error_stack::Report<KernelError>;
    fn try_from(row: StockAdjustmentRow) -> Result<Self, Self::Error> {
        Ok(StockAdjustment::new(
            AdjustmentId::new(row.id),
            BookId::new(row.book_id),
            StockDelta::new(row.delta),
            row.reason.parse::<AdjustmentReason>()?,
            StockQuantity::new(row.balance),
            row.operator.map(UserId::new),
            row.sale_id.map(SaleId::new),
            CreatedAt::new(row.created_at),
        ))
    }
}

pub(in crate::database) struct PgStockAdjustmentInternal;

impl PgStockAdjustmentInternal {
    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<StockAdjustment>, KernelError> {
        let rows = sqlx::query_as::<_, StockAdjustmentRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, delta, reason, balance, operator, sale_id, created_at
            FROM stock_adjustments
            WHERE book_id = $1
            ORDER BY seq
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(StockAdjustment::try_from).collect()
    }

    async fn sum_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<i64, KernelError> {
        // language=postgresql
        let sum = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(delta), 0)::BIGINT
            FROM stock_adjustments
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(sum)
    }

    async fn record(
        con: &mut PgConnection,
        adjustment: &StockAdjustment,
    ) -> error_stack::Result<(), KernelError> {
        let created_at: &OffsetDateTime = adjustment.created_at().as_ref();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO stock_adjustments (id, book_id, delta, reason, balance, operator, sale_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(adjustment.id().as_ref())
        .bind(adjustment.book_id().as_ref())
        .bind(adjustment.delta().value())
        .bind(adjustment.reason().as_str())
        .bind(adjustment.balance().value())
        .bind(adjustment.operator().as_ref().map(|operator| *operator.as_ref()))
        .bind(adjustment.sale_id().as_ref().map(|sale_id| *sale_id.as_ref()))
        .bind(created_at)
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::StockAdjustmentQuery;
    use kernel::interface::update::{BookModifier, StockAdjustmentModifier};
    use kernel::prelude::entity::{
        AdjustmentId, AdjustmentReason, Book, BookAuthor, BookId, BookTitle, CreatedAt, IsDeleted,
        Money, StockAdjustment, StockDelta, StockQuantity,
    };
    use kernel::KernelError;

    use crate::database::postgres::{
        PostgresBookRepository, PostgresDatabase, PostgresStockAdjustmentRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn ledger_sums_in_append_order() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("ledger book"),
            BookAuthor::new("author"),
            None,
            None,
            None,
            None,
            Money::from_cents(500),
            StockQuantity::new(0),
            IsDeleted::new(false),
            CreatedAt::now(),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let mut balance = 0;
        for (delta, reason) in [
            (10, AdjustmentReason::Restock),
            (-3, AdjustmentReason::Manual),
            (1, AdjustmentReason::Correction),
        ] {
            balance += delta;
            let adjustment = StockAdjustment::new(
                AdjustmentId::new(Uuid::new_v4()),
                book.id().clone(),
                StockDelta::new(delta),
                reason,
                StockQuantity::new(balance),
                None,
                None,
                CreatedAt::now(),
            );
            PostgresStockAdjustmentRepository
                .record(&mut con, &adjustment)
                .await?;
        }

        let history = PostgresStockAdjustmentRepository
            .find_by_book_id(&mut con, book.id())
            .await?;
        let deltas = history
            .iter()
            .map(|adjustment| adjustment.delta().value())
            .collect::<Vec<_>>();
        assert_eq!(deltas, vec![10, -3, 1]);

        let sum = PostgresStockAdjustmentRepository
            .sum_by_book_id(&mut con, book.id())
            .await?;
        assert_eq!(sum, 8);
        Ok(())
    }
}
