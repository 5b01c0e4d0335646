use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Distributor the store buys the title from.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Seller(String);

impl Seller {
    pub fn new(seller: impl Into<String>) -> Self {
        Self(seller.into())
    }
}
