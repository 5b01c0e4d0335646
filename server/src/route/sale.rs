use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{GetSaleRequest, SaleTransformer};
use crate::response::SalePresenter;
use application::service::GetSaleService;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

pub trait SaleRouter {
    fn route_sale(self) -> Self;
}

impl SaleRouter for Router<AppModule> {
    fn route_sale(self) -> Self {
        self.route(
            "/sales/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(SaleTransformer, SalePresenter)
                        .intake(GetSaleRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_sale(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
