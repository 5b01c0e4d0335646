use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    Actor, BestSellersRequest, LowStockRequest, ReportTransformer, SalesReportRequest,
};
use crate::response::ReportPresenter;
use application::service::{BestSellersService, LowStockService, SalesSummaryService};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;

pub trait ReportRouter {
    fn route_report(self) -> Self;
}

impl ReportRouter for Router<AppModule> {
    fn route_report(self) -> Self {
        self.route(
            "/reports/sales",
            get(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Query(req): Query<SalesReportRequest>| async move {
                    Controller::new(ReportTransformer, ReportPresenter)
                        .intake((actor, req))
                        .handle(|dto| async move { module.pgpool().sales_summary(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reports/best-sellers",
            get(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Query(req): Query<BestSellersRequest>| async move {
                    Controller::new(ReportTransformer, ReportPresenter)
                        .intake((actor, req))
                        .handle(|dto| async move { module.pgpool().best_sellers(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/reports/low-stock",
            get(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Query(req): Query<LowStockRequest>| async move {
                    Controller::new(ReportTransformer, ReportPresenter)
                        .intake((actor, req))
                        .handle(|dto| async move { module.pgpool().low_stock(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
