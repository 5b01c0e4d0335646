use crate::controller::Intake;
use crate::request::Actor;
use application::transfer::{AddToCartDto, CheckoutDto};
use kernel::prelude::entity::PaymentMethod;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    book_id: uuid::Uuid,
    quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    tendered: Decimal,
    method: PaymentMethod,
    authorization: Option<String>,
}

pub struct CartTransformer;

impl Intake<AddItemRequest> for CartTransformer {
    type To = AddToCartDto;
    fn emit(&self, input: AddItemRequest) -> Self::To {
        AddToCartDto {
            book_id: input.book_id,
            quantity: input.quantity,
        }
    }
}

impl Intake<(Actor, CheckoutRequest)> for CartTransformer {
    type To = CheckoutDto;
    fn emit(&self, input: (Actor, CheckoutRequest)) -> Self::To {
        let (actor, input) = input;
        CheckoutDto {
            cashier: actor.into(),
            tendered: input.tendered,
            method: input.method,
            authorization: input.authorization,
        }
    }
}
