use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::Quantity;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct StockDelta(i32);

impl StockDelta {
    pub fn new(delta: impl Into<i32>) -> Self {
        Self(delta.into())
    }

    pub fn removal(quantity: &Quantity) -> Self {
        Self(-quantity.value())
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}
