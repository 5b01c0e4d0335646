#![allow(dead_code)]

use rust_decimal::Decimal;
use uuid::Uuid;

use application::service::{RegisterBookService, RegisterUserService};
use application::transfer::{BookDto, CheckoutDto, RegisterBookDto, RegisterUserDto};
use driver::database::InMemoryDatabase;
use kernel::prelude::entity::{PaymentMethod, Role};

pub struct Fixture {
    pub db: InMemoryDatabase,
    pub admin: Uuid,
    pub manager: Uuid,
    pub cashier: Uuid,
}

pub async fn fixture() -> Fixture {
    let db = InMemoryDatabase::new();
    let admin = db
        .register_user(RegisterUserDto {
            actor: None,
            name: "admin".to_string(),
            credential: "hash-admin".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap()
        .id;
    let manager = db
        .register_user(RegisterUserDto {
            actor: Some(admin),
            name: "manager".to_string(),
            credential: "hash-manager".to_string(),
            role: Role::Manager,
        })
        .await
        .unwrap()
        .id;
    let cashier = db
        .register_user(RegisterUserDto {
            actor: Some(admin),
            name: "cashier".to_string(),
            credential: "hash-cashier".to_string(),
            role: Role::User,
        })
        .await
        .unwrap()
        .id;
    Fixture {
        db,
        admin,
        manager,
        cashier,
    }
}

pub async fn book(db: &InMemoryDatabase, actor: Uuid, price_cents: i64, quantity: i32) -> BookDto {
    db.register_book(RegisterBookDto {
        actor,
        title: format!("Book {}", Uuid::new_v4()),
        author: "Author".to_string(),
        isbn: None,
        genre: None,
        publisher: None,
        seller: None,
        price: Decimal::new(price_cents, 2),
        quantity,
    })
    .await
    .unwrap()
}

pub fn cash(cashier: Uuid, tendered_cents: i64) -> CheckoutDto {
    CheckoutDto {
        cashier,
        tendered: Decimal::new(tendered_cents, 2),
        method: PaymentMethod::Cash,
        authorization: None,
    }
}
