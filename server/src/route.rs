pub use self::{book::*, cart::*, report::*, sale::*, user::*};

mod book;
mod cart;
mod report;
mod sale;
mod user;
