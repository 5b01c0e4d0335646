use crate::controller::Exhaust;
use application::transfer::BookDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::prelude::entity::Money;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: String,
    isbn: Option<String>,
    genre: Option<String>,
    publisher: Option<String>,
    seller: Option<String>,
    price: Money,
    stock: i32,
    is_deleted: bool,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            isbn: value.isbn,
            genre: value.genre,
            publisher: value.publisher,
            seller: value.seller,
            price: value.price,
            stock: value.stock,
            is_deleted: value.is_deleted,
            created_at: value.created_at,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<()> for BookPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<BookDto> for BookPresenter {
    type To = BookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        BookResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}
