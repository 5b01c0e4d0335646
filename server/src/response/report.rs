use crate::controller::Exhaust;
use crate::response::BookResponse;
use application::transfer::{BestSellerDto, BookDto, SalesSummaryDto};
use axum::Json;
use kernel::prelude::entity::{Money, PaymentMethod};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct MethodSummaryResponse {
    method: PaymentMethod,
    sale_count: usize,
    revenue: Money,
}

#[derive(Debug, Serialize)]
pub struct SalesSummaryResponse {
    #[serde(with = "time::serde::rfc3339")]
    from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    to: OffsetDateTime,
    sale_count: usize,
    revenue: Money,
    items_sold: i64,
    by_method: Vec<MethodSummaryResponse>,
}

#[derive(Debug, Serialize)]
pub struct BestSellerResponse {
    book_id: Uuid,
    title: String,
    quantity: i64,
    revenue: Money,
}

pub struct ReportPresenter;

impl Exhaust<SalesSummaryDto> for ReportPresenter {
    type To = Json<SalesSummaryResponse>;
    fn emit(&self, input: SalesSummaryDto) -> Self::To {
        let by_method = input
            .by_method
            .into_iter()
            .map(|summary| MethodSummaryResponse {
                method: summary.method,
                sale_count: summary.sale_count,
                revenue: summary.revenue,
            })
            .collect();
        Json(SalesSummaryResponse {
            from: input.from,
            to: input.to,
            sale_count: input.sale_count,
            revenue: input.revenue,
            items_sold: input.items_sold,
            by_method,
        })
    }
}

impl Exhaust<Vec<BestSellerDto>> for ReportPresenter {
    type To = Json<Vec<BestSellerResponse>>;
    fn emit(&self, input: Vec<BestSellerDto>) -> Self::To {
        let ranking = input
            .into_iter()
            .map(|entry| BestSellerResponse {
                book_id: entry.book_id,
                title: entry.title,
                quantity: entry.quantity,
                revenue: entry.revenue,
            })
            .collect();
        Json(ranking)
    }
}

impl Exhaust<Vec<BookDto>> for ReportPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}
