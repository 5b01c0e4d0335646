mod id;
mod item;
mod payment;

pub use self::{id::*, item::*, payment::*};
use crate::entity::{CreatedAt, Money, UserId};
use crate::KernelError;
use destructure::Destructure;
use error_stack::Report;
use serde::Serialize;
use vodca::References;

/// Committed sale. Its total is always the sum of its item subtotals because
/// the only way to build one computes it from the items.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, References, Destructure)]
pub struct Sale {
    id: SaleId,
    sold_at: CreatedAt<Sale>,
    cashier: Option<UserId>,
    items: Vec<SaleItem>,
    total: Money,
    payment: Payment,
}

impl Sale {
    pub fn new(
        id: SaleId,
        sold_at: CreatedAt<Sale>,
        cashier: Option<UserId>,
        items: Vec<SaleItem>,
        payment: Payment,
    ) -> error_stack::Result<Self, KernelError> {
        let total = Self::sum(&items)?;
        Ok(Self {
            id,
            sold_at,
            cashier,
            items,
            total,
            payment,
        })
    }

    /// Rebuilds a stored sale. A stored total that disagrees with its items
    /// means the record was altered outside checkout.
    pub fn restore(
        id: SaleId,
        sold_at: CreatedAt<Sale>,
        cashier: Option<UserId>,
        items: Vec<SaleItem>,
        payment: Payment,
        stored_total: Money,
    ) -> error_stack::Result<Self, KernelError> {
        let sale = Self::new(id, sold_at, cashier, items, payment)
            .map_err(|report| report.change_context(KernelError::Internal))?;
        if sale.total != stored_total {
            return Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Stored sale {} total {stored_total}", sale.id.as_ref()))
                .attach_printable(format!("Recomputed total {}", sale.total)));
        }
        Ok(sale)
    }

    /// Total recomputed from the items, independent of the stored value.
    pub fn recomputed_total(&self) -> error_stack::Result<Money, KernelError> {
        Self::sum(&self.items)
    }

    pub fn units(&self) -> i64 {
        self.items
            .iter()
            .map(|item| i64::from(item.quantity().value()))
            .sum()
    }

    fn sum(items: &[SaleItem]) -> error_stack::Result<Money, KernelError> {
        items.iter().try_fold(Money::ZERO, |total, item| {
            item.subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or_else(|| {
                    Report::new(KernelError::Validation).attach_printable("Sale total overflowed")
                })
        })
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{
        BookId, CreatedAt, Money, Payment, PaymentMethod, Quantity, Sale, SaleId, SaleItem,
    };
    use crate::KernelError;

    fn cash_payment(total_cents: i64) -> Payment {
        Payment::settle(
            PaymentMethod::Cash,
            Money::from_cents(total_cents),
            None,
            Money::from_cents(total_cents),
        )
        .unwrap()
    }

    #[test]
    fn total_matches_items() {
        let items = vec![
            SaleItem::new(
                BookId::new(Uuid::new_v4()),
                Quantity::try_new(2).unwrap(),
                Money::from_cents(1299),
            ),
            SaleItem::new(
                BookId::new(Uuid::new_v4()),
                Quantity::try_new(1).unwrap(),
                Money::from_cents(1450),
            ),
        ];
        let payment = Payment::settle(
            PaymentMethod::Cash,
            Money::from_cents(5000),
            None,
            Money::from_cents(4048),
        )
        .unwrap();
        let sale = Sale::new(
            SaleId::new(Uuid::new_v4()),
            CreatedAt::now(),
            None,
            items,
            payment,
        )
        .unwrap();
        assert_eq!(sale.total(), &Money::from_cents(4048));
        assert_eq!(sale.recomputed_total().unwrap(), *sale.total());
        assert_eq!(sale.units(), 3);
    }

    #[test]
    fn restore_accepts_matching_total() {
        let items = vec![SaleItem::new(
            BookId::new(Uuid::new_v4()),
            Quantity::try_new(3).unwrap(),
            Money::from_cents(500),
        )];
        let sale = Sale::restore(
            SaleId::new(Uuid::new_v4()),
            CreatedAt::now(),
            None,
            items,
            cash_payment(1500),
            Money::from_cents(1500),
        )
        .unwrap();
        assert_eq!(sale.total(), &Money::from_cents(1500));
    }

    #[test]
    fn restore_rejects_tampered_total() {
        let items = vec![SaleItem::new(
            BookId::new(Uuid::new_v4()),
            Quantity::try_new(3).unwrap(),
            Money::from_cents(500),
        )];
        let report = Sale::restore(
            SaleId::new(Uuid::new_v4()),
            CreatedAt::now(),
            None,
            items,
            cash_payment(1500),
            Money::from_cents(1400),
        )
        .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
        let rendered = format!("{report:?}");
        assert!(rendered.contains("14.00"));
        assert!(rendered.contains("15.00"));
    }
}
