use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Positive number of copies on a cart line or sale item.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Fromln, AsRefln)]
pub struct Quantity(i32);

impl Quantity {
    pub fn try_new(quantity: i32) -> Option<Self> {
        (quantity > 0).then_some(Self(quantity))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn checked_add(&self, other: &Quantity) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Quantity::try_new(value)
            .ok_or_else(|| serde::de::Error::custom(format!("quantity must be positive: {value}")))
    }
}
