use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{Actor, ChangeRoleRequest, GetUserRequest, RegisterUserRequest, UserTransformer};
use crate::response::{Created, UserPresenter};
use application::service::{ChangeRoleService, GetUserService, RegisterUserService};
use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), UserPresenter)
                    .bypass(|| async move { module.pgpool().list_users().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>,
                 actor: Option<Actor>,
                 Json(req): Json<RegisterUserRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake((actor, req))
                        .handle(|dto| async move { module.pgpool().register_user(dto).await })
                        .await
                        .map(Created)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake(GetUserRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/role",
            patch(
                |State(module): State<AppModule>,
                 actor: Actor,
                 Path(id): Path<Uuid>,
                 Json(req): Json<ChangeRoleRequest>| async move {
                    Controller::new(UserTransformer, UserPresenter)
                        .intake((actor, id, req))
                        .handle(|dto| async move { module.pgpool().change_role(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
