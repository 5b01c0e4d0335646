mod adjustment;
mod book;
mod cart;
mod common;
mod sale;
mod user;

pub use self::{adjustment::*, book::*, cart::*, common::*, sale::*, user::*};
