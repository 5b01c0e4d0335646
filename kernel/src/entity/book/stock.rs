use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::{Quantity, StockDelta};

/// Units on the shelf. Never negative.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln,
    AsRefln,
)]
pub struct StockQuantity(i32);

impl StockQuantity {
    /// Wraps a value read back from storage, where the schema already rules out
    /// negative stock. Use [`StockQuantity::try_new`] for untrusted input.
    pub fn new(quantity: impl Into<i32>) -> Self {
        Self(quantity.into())
    }

    pub fn try_new(quantity: i32) -> Option<Self> {
        (quantity >= 0).then_some(Self(quantity))
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Balance after applying `delta`, or `None` if it would go negative.
    pub fn apply(&self, delta: &StockDelta) -> Option<Self> {
        self.0
            .checked_add(delta.value())
            .and_then(Self::try_new)
    }

    pub fn covers(&self, quantity: &Quantity) -> bool {
        quantity.value() <= self.0
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{Quantity, StockDelta, StockQuantity};

    #[test]
    fn apply_never_goes_negative() {
        let stock = StockQuantity::new(3);
        assert_eq!(stock.apply(&StockDelta::new(-3)), Some(StockQuantity::new(0)));
        assert_eq!(stock.apply(&StockDelta::new(-4)), None);
        assert_eq!(stock.apply(&StockDelta::new(5)), Some(StockQuantity::new(8)));
        assert_eq!(StockQuantity::new(i32::MAX).apply(&StockDelta::new(1)), None);
    }

    #[test]
    fn covers_compares_against_requested_quantity() {
        let stock = StockQuantity::new(2);
        assert!(stock.covers(&Quantity::try_new(2).unwrap()));
        assert!(!stock.covers(&Quantity::try_new(3).unwrap()));
    }

    #[test]
    fn rejects_negative_input() {
        assert_eq!(StockQuantity::try_new(-1), None);
        assert_eq!(StockQuantity::try_new(0), Some(StockQuantity::new(0)));
    }
}
