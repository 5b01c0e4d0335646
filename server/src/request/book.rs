use crate::controller::Intake;
use crate::request::Actor;
use application::transfer::{
    DeleteBookDto, GetBookDto, ListBooksDto, RegisterBookDto, UpdateBookDto,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ListBooksRequest {
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
    #[serde(default)]
    in_stock_only: bool,
    #[serde(default)]
    include_deleted: bool,
    limit: Option<i32>,
    offset: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterBookRequest {
    title: String,
    author: String,
    isbn: Option<String>,
    genre: Option<String>,
    publisher: Option<String>,
    seller: Option<String>,
    price: Decimal,
    #[serde(default)]
    quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    isbn: Option<String>,
    genre: Option<String>,
    publisher: Option<String>,
    seller: Option<String>,
    price: Option<Decimal>,
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: Uuid,
}

impl GetBookRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    actor: Actor,
    id: Uuid,
}

impl DeleteBookRequest {
    pub fn new(actor: Actor, id: Uuid) -> Self {
        Self { actor, id }
    }
}

pub struct BookTransformer;

impl Intake<ListBooksRequest> for BookTransformer {
    type To = ListBooksDto;
    fn emit(&self, input: ListBooksRequest) -> Self::To {
        ListBooksDto {
            title: input.title,
            author: input.author,
            genre: input.genre,
            in_stock_only: input.in_stock_only,
            max_stock: None,
            include_deleted: input.include_deleted,
            limit: input.limit,
            offset: input.offset,
        }
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<(Actor, RegisterBookRequest)> for BookTransformer {
    type To = RegisterBookDto;
    fn emit(&self, input: (Actor, RegisterBookRequest)) -> Self::To {
        let (actor, input) = input;
        RegisterBookDto {
            actor: actor.into(),
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            genre: input.genre,
            publisher: input.publisher,
            seller: input.seller,
            price: input.price,
            quantity: input.quantity,
        }
    }
}

impl Intake<(Actor, Uuid, UpdateBookRequest)> for BookTransformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (Actor, Uuid, UpdateBookRequest)) -> Self::To {
        let (actor, id, input) = input;
        UpdateBookDto {
            actor: actor.into(),
            id,
            title: input.title,
            author: input.author,
            isbn: input.isbn,
            genre: input.genre,
            publisher: input.publisher,
            seller: input.seller,
            price: input.price,
        }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto {
            actor: input.actor.into(),
            id: input.id,
        }
    }
}
