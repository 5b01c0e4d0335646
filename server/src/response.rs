use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub use self::{book::*, cart::*, report::*, sale::*, stock::*, user::*};

mod book;
mod cart;
mod report;
mod sale;
mod stock;
mod user;

/// Sends the wrapped response with `201 Created`.
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}
