use crate::controller::Intake;
use crate::request::Actor;
use application::transfer::{BestSellersDto, LowStockDto, SalesReportDto};
use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct SalesReportRequest {
    #[serde(with = "time::serde::rfc3339")]
    from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    to: OffsetDateTime,
}

// default attribute does not take literals (https://github.com/serde-rs/serde/issues/368)
fn default_best_sellers() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct BestSellersRequest {
    #[serde(with = "time::serde::rfc3339")]
    from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    to: OffsetDateTime,
    #[serde(default = "default_best_sellers")]
    limit: usize,
}

fn default_threshold() -> i32 {
    5
}

#[derive(Debug, Deserialize)]
pub struct LowStockRequest {
    #[serde(default = "default_threshold")]
    threshold: i32,
}

pub struct ReportTransformer;

impl Intake<(Actor, SalesReportRequest)> for ReportTransformer {
    type To = SalesReportDto;
    fn emit(&self, input: (Actor, SalesReportRequest)) -> Self::To {
        let (actor, input) = input;
        SalesReportDto {
            actor: actor.into(),
            from: input.from,
            to: input.to,
        }
    }
}

impl Intake<(Actor, BestSellersRequest)> for ReportTransformer {
    type To = BestSellersDto;
    fn emit(&self, input: (Actor, BestSellersRequest)) -> Self::To {
        let (actor, input) = input;
        BestSellersDto {
            actor: actor.into(),
            from: input.from,
            to: input.to,
            limit: input.limit,
        }
    }
}

impl Intake<(Actor, LowStockRequest)> for ReportTransformer {
    type To = LowStockDto;
    fn emit(&self, input: (Actor, LowStockRequest)) -> Self::To {
        let (actor, input) = input;
        LowStockDto {
            actor: actor.into(),
            threshold: input.threshold,
        }
    }
}
