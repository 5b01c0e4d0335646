mod adjustment;
mod book;
mod sale;
mod user;

pub use self::{adjustment::*, book::*, sale::*, user::*};
