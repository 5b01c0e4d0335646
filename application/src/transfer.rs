pub use self::{book::*, cart::*, report::*, sale::*, stock::*, user::*};

mod book;
mod cart;
mod report;
mod sale;
mod stock;
mod user;
