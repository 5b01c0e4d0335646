use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    Actor, AdjustStockRequest, BookTransformer, DeleteBookRequest, GetBookRequest,
    ListBooksRequest, ReconcileRequest, RegisterBookRequest, StockHistoryRequest,
    StockTransformer, UpdateBookRequest,
};
use crate::response::{BookPresenter, Created, StockPresenter};
use application::service::{
    AdjustStockService, DeleteBookService, GetBookService, ListBooksService,
    ReconcileStockService, RegisterBookService, StockHistoryService, UpdateBookService,
};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(
                |State(module): State<AppModule>, Query(req): Query<ListBooksRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().list_books(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Json(req): Json<RegisterBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((actor, req))
                        .handle(|dto| async move { module.pgpool().register_book(dto).await })
                        .await
                        .map(Created)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((actor, id, req))
                        .handle(|dto| async move { module.pgpool().update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, actor: Actor, Path(id): Path<Uuid>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(actor, id))
                        .handle(|dto| async move { module.pgpool().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id/stock",
            post(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Path(id): Path<Uuid>,
                 Json(req): Json<AdjustStockRequest>| async move {
                    Controller::new(StockTransformer, BookPresenter)
                        .intake((actor, id, req))
                        .handle(|dto| async move { module.pgpool().adjust_stock(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id/adjustments",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(StockTransformer, StockPresenter)
                        .intake(StockHistoryRequest::new(id))
                        .handle(|dto| async move { module.pgpool().stock_history(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id/reconcile",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(StockTransformer, StockPresenter)
                        .intake(ReconcileRequest::new(id))
                        .handle(|dto| async move { module.pgpool().reconcile(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
