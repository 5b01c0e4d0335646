use std::collections::HashMap;

use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::SaleQuery;
use kernel::interface::update::SaleModifier;
use kernel::prelude::entity::{
    BookId, CreatedAt, Money, Payment, PaymentMethod, Quantity, Sale, SaleId, SaleItem, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresSaleRepository;

#[async_trait::async_trait]
impl SaleQuery for PostgresSaleRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &SaleId,
    ) -> error_stack::Result<Option<Sale>, KernelError> {
        PgSaleInternal::find_by_id(con, id).await
    }

    async fn find_between(
        &self,
        con: &mut PostgresTransaction,
        from: &OffsetDateTime,
        to: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Sale>, KernelError> {
        PgSaleInternal::find_between(con, from, to).await
    }
}

#[async_trait::async_trait]
impl SaleModifier for PostgresSaleRepository {
    type Transaction = PostgresTransaction;
    async fn create(
        &self,
        con: &mut PostgresTransaction,
        sale: &Sale,
    ) -> error_stack::Result<(), KernelError> {
        PgSaleInternal::create(con, sale).await
    }
}

#[derive(sqlx::FromRow)]
struct SaleRow {
    id: Uuid,
    sold_at: OffsetDateTime,
    cashier: Option<Uuid>,
    total_cents: i64,
    payment_method: String,
    tendered_cents: i64,
    change_cents: i64,
    authorization_ref: Option<String>,
}

#[derive(sqlx::FromRow)]
struct SaleItemRow {
    sale_id: Uuid,
    book_id: Uuid,
    quantity: i32,
    unit_price_cents: i64,
}

impl TryFrom<SaleItemRow> for SaleItem {
    type Error = Report<KernelError>;
    fn try_from(row: SaleItemRow) -> Result<Self, Self::Error> {
        let quantity = Quantity::try_new(row.quantity).ok_or_else(|| {
            Report::new(KernelError::Internal)
                .attach_printable(format!("Stored sale item quantity {}", row.quantity))
        })?;
        Ok(SaleItem::new(
            BookId::new(row.book_id),
            quantity,
            Money::from_cents(row.unit_price_cents),
        ))
    }
}

impl SaleRow {
    fn into_sale(self, items: Vec<SaleItem>) -> error_stack::Result<Sale, KernelError> {
        let method = self.payment_method.parse::<PaymentMethod>()?;
        let payment = Payment::new(
            method,
            Money::from_cents(self.tendered_cents),
            Money::from_cents(self.change_cents),
            self.authorization_ref,
        );
        Sale::restore(
            SaleId::new(self.id),
            CreatedAt::new(self.sold_at),
            self.cashier.map(UserId::new),
            items,
            payment,
            Money::from_cents(self.total_cents),
        )
    }
}

pub(in crate::database) struct PgSaleInternal;

impl PgSaleInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &SaleId,
    ) -> error_stack::Result<Option<Sale>, KernelError> {
        let row = sqlx::query_as::<_, SaleRow>(
            // language=postgresql
            r#"
            SELECT id, sold_at, cashier, total_cents, payment_method, tendered_cents, change_cents, authorization_ref
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(&mut *con)
        .await
        .convert_error()?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut items = Self::find_items(con, &[row.id]).await?;
        let items = items.remove(&row.id).unwrap_or_default();
        row.into_sale(items).map(Some)
    }

    async fn find_between(
        con: &mut PgConnection,
        from: &OffsetDateTime,
        to: &OffsetDateTime,
    ) -> error_stack::Result<Vec<Sale>, KernelError> {
        let rows = sqlx::query_as::<_, SaleRow>(
            // language=postgresql
            r#"
            SELECT id, sold_at, cashier, total_cents, payment_method, tendered_cents, change_cents, authorization_ref
            FROM sales
            WHERE sold_at >= $1 AND sold_at < $2
            ORDER BY sold_at, id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&mut *con)
        .await
        .convert_error()?;
        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let mut items = Self::find_items(con, &ids).await?;
        rows.into_iter()
            .map(|row| {
                let sale_items = items.remove(&row.id).unwrap_or_default();
                row.into_sale(sale_items)
            })
            .collect()
    }

    async fn find_items(
        con: &mut PgConnection,
        sale_ids: &[Uuid],
    ) -> error_stack::Result<HashMap<Uuid, Vec<SaleItem>>, KernelError> {
        let rows = sqlx::query_as::<_, SaleItemRow>(
            // language=postgresql
            r#"
            SELECT sale_id, book_id, quantity, unit_price_cents
            FROM sale_items
            WHERE sale_id = ANY($1)
            ORDER BY sale_id, position
            "#,
        )
        .bind(sale_ids)
        .fetch_all(con)
        .await
        .convert_error()?;
        let mut grouped: HashMap<Uuid, Vec<SaleItem>> = HashMap::new();
        for row in rows {
            let sale_id = row.sale_id;
            grouped
                .entry(sale_id)
                .or_default()
                .push(SaleItem::try_from(row)?);
        }
        Ok(grouped)
    }

    async fn create(con: &mut PgConnection, sale: &Sale) -> error_stack::Result<(), KernelError> {
        let sold_at: &OffsetDateTime = sale.sold_at().as_ref();
        let payment = sale.payment();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO sales (id, sold_at, cashier, total_cents, payment_method, tendered_cents, change_cents, authorization_ref)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(sale.id().as_ref())
        .bind(sold_at)
        .bind(sale.cashier().as_ref().map(|cashier| *cashier.as_ref()))
        .bind(sale.total().cents())
        .bind(payment.method().as_str())
        .bind(payment.tendered().cents())
        .bind(payment.change().cents())
        .bind(payment.authorization().as_deref())
        .execute(&mut *con)
        .await
        .convert_error()?;

        for (position, item) in sale.items().iter().enumerate() {
            let position = i32::try_from(position).map_err(|error| {
                Report::new(error).change_context(KernelError::Validation)
            })?;
            sqlx::query(
                // language=postgresql
                r#"
                INSERT INTO sale_items (sale_id, position, book_id, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(sale.id().as_ref())
            .bind(position)
            .bind(item.book_id().as_ref())
            .bind(item.quantity().value())
            .bind(item.unit_price().cents())
            .execute(&mut *con)
            .await
            .convert_error()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::SaleQuery;
    use kernel::interface::update::{BookModifier, SaleModifier};
    use kernel::prelude::entity::{
        Book, BookAuthor, BookId, BookTitle, CreatedAt, IsDeleted, Money, Payment, PaymentMethod,
        Quantity, Sale, SaleId, SaleItem, StockQuantity,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresBookRepository, PostgresDatabase, PostgresSaleRepository};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn sale_round_trip() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("sold book"),
            BookAuthor::new("author"),
            None,
            None,
            None,
            None,
            Money::from_cents(1299),
            StockQuantity::new(10),
            IsDeleted::new(false),
            CreatedAt::now(),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let total = Money::from_cents(2598);
        let payment = Payment::settle(PaymentMethod::Cash, Money::from_cents(3000), None, total)?;
        let sale = Sale::new(
            SaleId::new(Uuid::new_v4()),
            CreatedAt::now(),
            None,
            vec![SaleItem::new(
                book.id().clone(),
                Quantity::try_new(2).ok_or_else(|| error_stack::Report::new(KernelError::Internal))?,
                *book.price(),
            )],
            payment,
        )?;
        PostgresSaleRepository.create(&mut con, &sale).await?;

        let found = PostgresSaleRepository.find_by_id(&mut con, sale.id()).await?;
        let found = found.ok_or_else(|| error_stack::Report::new(KernelError::NotFound))?;
        assert_eq!(found.id(), sale.id());
        assert_eq!(found.items(), sale.items());
        assert_eq!(found.total(), &total);
        assert_eq!(found.payment().change(), &Money::from_cents(402));

        let now = OffsetDateTime::now_utc();
        let between = PostgresSaleRepository
            .find_between(&mut con, &(now - Duration::hours(1)), &(now + Duration::hours(1)))
            .await?;
        assert!(between.iter().any(|found| found.id() == sale.id()));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn altered_total_is_rejected_on_read() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new("tampered sale book"),
            BookAuthor::new("author"),
            None,
            None,
            None,
            None,
            Money::from_cents(1000),
            StockQuantity::new(5),
            IsDeleted::new(false),
            CreatedAt::now(),
        );
        PostgresBookRepository.create(&mut con, &book).await?;

        let total = Money::from_cents(1000);
        let payment = Payment::settle(PaymentMethod::Cash, total, None, total)?;
        let sale = Sale::new(
            SaleId::new(Uuid::new_v4()),
            CreatedAt::now(),
            None,
            vec![SaleItem::new(
                book.id().clone(),
                Quantity::try_new(1).ok_or_else(|| error_stack::Report::new(KernelError::Internal))?,
                *book.price(),
            )],
            payment,
        )?;
        PostgresSaleRepository.create(&mut con, &sale).await?;

        sqlx::query(
            // language=postgresql
            r#"
            UPDATE sales SET total_cents = total_cents + 1 WHERE id = $1
            "#,
        )
        .bind(sale.id().as_ref())
        .execute(&mut *con)
        .await
        .map_err(|error| error_stack::Report::new(error).change_context(KernelError::Internal))?;

        let report = PostgresSaleRepository
            .find_by_id(&mut con, sale.id())
            .await
            .expect_err("altered total must not load");
        assert_eq!(report.current_context(), &KernelError::Internal);
        Ok(())
    }
}
