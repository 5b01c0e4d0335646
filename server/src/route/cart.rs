use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{Actor, AddItemRequest, CartTransformer, CheckoutRequest};
use crate::response::{CartPresenter, Created, SalePresenter};
use application::service::{AddToCartService, CheckoutService};
use application::transfer::CartDto;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use error_stack::Report;
use kernel::prelude::entity::BookId;
use kernel::KernelError;
use uuid::Uuid;

pub trait CartRouter {
    fn route_cart(self) -> Self;
}

impl CartRouter for Router<AppModule> {
    fn route_cart(self) -> Self {
        self.route(
            "/carts",
            post(|State(module): State<AppModule>| async move {
                Controller::new((), CartPresenter)
                    .bypass(|| async move {
                        Ok::<_, Report<KernelError>>(module.carts().open().await)
                    })
                    .await
                    .map(Created)
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/carts/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new((), CartPresenter)
                        .bypass(|| async move {
                            let session = module.carts().find(&id).await?;
                            let cart = session.lock().await;
                            let dto = CartDto::try_from(&*cart);
                            dto.map(|dto| (id, dto))
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    module
                        .carts()
                        .close(&id)
                        .await
                        .map(|_| StatusCode::NO_CONTENT)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/carts/:id/items",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<AddItemRequest>| async move {
                    Controller::new(CartTransformer, CartPresenter)
                        .intake(req)
                        .handle(|dto| async move {
                            let session = module.carts().find(&id).await?;
                            let mut cart = session.lock().await;
                            let result = module.pgpool().add_to_cart(&mut cart, dto).await;
                            drop(cart);
                            result.map(|dto| (id, dto))
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/carts/:id/items/:book_id",
            delete(
                |State(module): State<AppModule>,
                 Path((id, book_id)): Path<(Uuid, Uuid)>| async move {
                    Controller::new((), CartPresenter)
                        .bypass(|| async move {
                            let session = module.carts().find(&id).await?;
                            let mut cart = session.lock().await;
                            cart.remove(&BookId::new(book_id));
                            let dto = CartDto::try_from(&*cart);
                            dto.map(|dto| (id, dto))
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/carts/:id/checkout",
            post(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Path(id): Path<Uuid>,
                 Json(req): Json<CheckoutRequest>| async move {
                    Controller::new(CartTransformer, SalePresenter)
                        .intake((actor, req))
                        .handle(|dto| async move {
                            let session = module.carts().find(&id).await?;
                            let mut cart = session.lock().await;
                            let result = module.pgpool().checkout(&mut cart, dto).await;
                            drop(cart);
                            if result.is_ok() {
                                module.carts().discard(&id).await;
                            }
                            result
                        })
                        .await
                        .map(Created)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
