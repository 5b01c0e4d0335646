use std::fmt::{Display, Formatter};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MINOR_UNITS: u32 = 2;

/// An amount of currency held as integer minor units (cents).
///
/// Decimal input is rounded half away from zero to whole cents exactly once,
/// when it enters the system. Everything after that is integer arithmetic, so
/// sums never drift and totals never depend on the order of their terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: impl Into<i64>) -> Self {
        Self(cents.into())
    }

    /// Returns `None` when the amount does not fit in `i64` cents.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        amount
            .round_dp_with_strategy(MINOR_UNITS, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Self)
    }

    pub fn from_f64(amount: f64) -> Option<Self> {
        Decimal::from_f64(amount).and_then(Self::from_decimal)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MINOR_UNITS)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom(format!("amount out of range: {amount}")))
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::Money;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec("12.345")), Some(Money::from_cents(1235)));
        assert_eq!(Money::from_decimal(dec("12.344")), Some(Money::from_cents(1234)));
        assert_eq!(Money::from_decimal(dec("-0.005")), Some(Money::from_cents(-1)));
        assert_eq!(Money::from_decimal(dec("7")), Some(Money::from_cents(700)));
    }

    #[test]
    fn float_input_is_normalized_to_cents() {
        assert_eq!(Money::from_f64(12.99), Some(Money::from_cents(1299)));
        assert_eq!(Money::from_f64(0.1 + 0.2), Some(Money::from_cents(30)));
    }

    #[test]
    fn repeated_addition_does_not_drift() {
        let dime = Money::from_f64(0.1).unwrap();
        let total = std::iter::repeat(dime)
            .take(1000)
            .try_fold(Money::ZERO, Money::checked_add);
        assert_eq!(total, Some(Money::from_cents(10_000)));
    }

    #[test]
    fn arithmetic_reports_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(max.checked_mul(2), None);
    }

    #[test]
    fn displays_two_places() {
        assert_eq!(Money::from_cents(4048).to_string(), "40.48");
        assert_eq!(Money::from_cents(5000).to_string(), "50.00");
        assert_eq!(Money::from_cents(952).to_string(), "9.52");
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(Money::from_decimal(Decimal::MAX), None);
    }
}
