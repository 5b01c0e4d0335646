use crate::controller::Exhaust;
use application::transfer::CartDto;
use axum::Json;
use kernel::prelude::entity::Money;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CartOpenedResponse {
    id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    book_id: Uuid,
    quantity: i32,
    unit_price: Money,
    subtotal: Money,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    id: Uuid,
    lines: Vec<CartLineResponse>,
    total: Money,
}

pub struct CartPresenter;

impl Exhaust<Uuid> for CartPresenter {
    type To = Json<CartOpenedResponse>;
    fn emit(&self, input: Uuid) -> Self::To {
        Json(CartOpenedResponse { id: input })
    }
}

impl Exhaust<(Uuid, CartDto)> for CartPresenter {
    type To = Json<CartResponse>;
    fn emit(&self, input: (Uuid, CartDto)) -> Self::To {
        let (id, cart) = input;
        let lines = cart
            .lines
            .into_iter()
            .map(|line| CartLineResponse {
                book_id: line.book_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
            })
            .collect();
        Json(CartResponse {
            id,
            lines,
            total: cart.total,
        })
    }
}
