use std::collections::{BTreeMap, HashMap};

use error_stack::Report;
use time::OffsetDateTime;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    BookFilter, BookQuery, DependOnBookQuery, DependOnSaleQuery, SaleQuery,
};
use kernel::prelude::entity::{BookId, Money, Permission, SelectLimit, StockQuantity, UserId};
use kernel::KernelError;

use crate::service::Authorize;
use crate::transfer::{
    BestSellerDto, BestSellersDto, BookDto, LowStockDto, MethodSummaryDto, SalesReportDto,
    SalesSummaryDto,
};

fn check_range(from: &OffsetDateTime, to: &OffsetDateTime) -> error_stack::Result<(), KernelError> {
    if from > to {
        return Err(Report::new(KernelError::Validation)
            .attach_printable(format!("Report range starts after it ends: {from} > {to}")));
    }
    Ok(())
}

fn add_revenue(total: Money, amount: Money) -> error_stack::Result<Money, KernelError> {
    total.checked_add(amount).ok_or_else(|| {
        Report::new(KernelError::Internal)
            .attach_printable(format!("Revenue overflowed adding {amount} to {total}"))
    })
}

#[async_trait::async_trait]
pub trait SalesSummaryService: 'static + Sync + Send + Authorize + DependOnSaleQuery {
    async fn sales_summary(
        &self,
        dto: SalesReportDto,
    ) -> error_stack::Result<SalesSummaryDto, KernelError> {
        check_range(&dto.from, &dto.to)?;
        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &UserId::new(dto.actor), Permission::ViewReports)
            .await?;
        let sales = self
            .sale_query()
            .find_between(&mut connection, &dto.from, &dto.to)
            .await?;

        let mut revenue = Money::ZERO;
        let mut by_method = BTreeMap::new();
        for sale in &sales {
            revenue = add_revenue(revenue, *sale.total())?;
            let entry = by_method
                .entry(*sale.payment().method())
                .or_insert((0usize, Money::ZERO));
            entry.0 += 1;
            entry.1 = add_revenue(entry.1, *sale.total())?;
        }
        Ok(SalesSummaryDto {
            from: dto.from,
            to: dto.to,
            sale_count: sales.len(),
            revenue,
            items_sold: sales.iter().map(|sale| sale.units()).sum(),
            by_method: by_method
                .into_iter()
                .map(|(method, (sale_count, revenue))| MethodSummaryDto {
                    method,
                    sale_count,
                    revenue,
                })
                .collect(),
        })
    }
}

impl<T> SalesSummaryService for T where T: Authorize + DependOnSaleQuery {}

#[async_trait::async_trait]
pub trait BestSellersService:
    'static + Sync + Send + Authorize + DependOnSaleQuery + DependOnBookQuery
{
    async fn best_sellers(
        &self,
        dto: BestSellersDto,
    ) -> error_stack::Result<Vec<BestSellerDto>, KernelError> {
        check_range(&dto.from, &dto.to)?;
        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &UserId::new(dto.actor), Permission::ViewReports)
            .await?;
        let sales = self
            .sale_query()
            .find_between(&mut connection, &dto.from, &dto.to)
            .await?;

        let mut totals: HashMap<BookId, (i64, Money)> = HashMap::new();
        for item in sales.iter().flat_map(|sale| sale.items()) {
            let subtotal = item.subtotal().ok_or_else(|| {
                Report::new(KernelError::Internal).attach_printable("Stored sale item overflowed")
            })?;
            let entry = totals
                .entry(item.book_id().clone())
                .or_insert((0, Money::ZERO));
            entry.0 += i64::from(item.quantity().value());
            entry.1 = add_revenue(entry.1, subtotal)?;
        }
        let mut ranked = totals.into_iter().collect::<Vec<_>>();
        ranked.sort_by(|(a_id, (a_qty, a_rev)), (b_id, (b_qty, b_rev))| {
            b_qty.cmp(a_qty).then(b_rev.cmp(a_rev)).then(a_id.cmp(b_id))
        });
        ranked.truncate(dto.limit);

        let mut best = Vec::with_capacity(ranked.len());
        for (book_id, (quantity, revenue)) in ranked {
            let title = self
                .book_query()
                .find_by_id(&mut connection, &book_id)
                .await?
                .map(|book| {
                    let title: &String = book.title().as_ref();
                    title.clone()
                })
                .unwrap_or_default();
            best.push(BestSellerDto {
                book_id: book_id.into(),
                title,
                quantity,
                revenue,
            });
        }
        Ok(best)
    }
}

impl<T> BestSellersService for T where T: Authorize + DependOnSaleQuery + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait LowStockService: 'static + Sync + Send + Authorize + DependOnBookQuery {
    async fn low_stock(&self, dto: LowStockDto) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let threshold = StockQuantity::try_new(dto.threshold).ok_or_else(|| {
            Report::new(KernelError::Validation)
                .attach_printable(format!("Threshold must not be negative: {}", dto.threshold))
        })?;
        let mut connection = self.database_connection().transact().await?;
        self.authorize(&mut connection, &UserId::new(dto.actor), Permission::ViewReports)
            .await?;
        let filter = BookFilter {
            max_stock: Some(threshold),
            limit: SelectLimit::new(i32::MAX),
            ..BookFilter::default()
        };
        let mut books = self.book_query().find_all(&mut connection, &filter).await?;
        books.sort_by_key(|book| *book.stock());
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> LowStockService for T where T: Authorize + DependOnBookQuery {}
