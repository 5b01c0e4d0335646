use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{Money, PaymentMethod};

pub struct SalesReportDto {
    pub actor: Uuid,
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
}

pub struct BestSellersDto {
    pub actor: Uuid,
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
    pub limit: usize,
}

pub struct LowStockDto {
    pub actor: Uuid,
    pub threshold: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSummaryDto {
    pub method: PaymentMethod,
    pub sale_count: usize,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummaryDto {
    pub from: OffsetDateTime,
    pub to: OffsetDateTime,
    pub sale_count: usize,
    pub revenue: Money,
    pub items_sold: i64,
    pub by_method: Vec<MethodSummaryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestSellerDto {
    pub book_id: Uuid,
    pub title: String,
    pub quantity: i64,
    pub revenue: Money,
}
