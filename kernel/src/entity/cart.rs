use error_stack::Report;
use serde::Serialize;
use vodca::References;

use crate::entity::{Book, BookId, Money, Quantity};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, References)]
pub struct CartLine {
    book_id: BookId,
    quantity: Quantity,
    unit_price: Money,
}

impl CartLine {
    pub fn new(book_id: BookId, quantity: Quantity, unit_price: Money) -> Self {
        Self {
            book_id,
            quantity,
            unit_price,
        }
    }

    pub fn subtotal(&self) -> Option<Money> {
        self.unit_price.checked_mul(i64::from(self.quantity.value()))
    }
}

/// Prospective purchase held by one session. Lives only in memory until
/// checkout turns it into a sale.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, book_id: &BookId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.book_id() == book_id)
    }

    /// Adds `quantity` copies of `book`, merging into an existing line.
    ///
    /// The combined quantity is checked against the book's current stock and
    /// the cart is left untouched when it does not fit. A merged line keeps
    /// the price captured when it was first added.
    pub fn add(&mut self, book: &Book, quantity: Quantity) -> error_stack::Result<(), KernelError> {
        if !book.is_available() {
            return Err(Report::new(KernelError::NotFound).attach(book.id().clone()));
        }
        let requested = match self.line(book.id()) {
            Some(line) => line.quantity().checked_add(&quantity).ok_or_else(|| {
                Report::new(KernelError::Validation)
                    .attach_printable("Cart line quantity overflowed")
            })?,
            None => quantity,
        };
        if !book.stock().covers(&requested) {
            return Err(Report::new(KernelError::InsufficientStock)
                .attach(book.id().clone())
                .attach_printable(format!(
                    "Requested {} but only {} in stock",
                    requested.value(),
                    book.stock().value()
                )));
        }
        match self.lines.iter_mut().find(|line| line.book_id == *book.id()) {
            Some(line) => line.quantity = requested,
            None => self
                .lines
                .push(CartLine::new(book.id().clone(), requested, *book.price())),
        }
        Ok(())
    }

    /// Removing a line that is not there is a no-op.
    pub fn remove(&mut self, book_id: &BookId) {
        self.lines.retain(|line| line.book_id() != book_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Exact sum of every line's `unit_price * quantity`.
    pub fn total(&self) -> error_stack::Result<Money, KernelError> {
        self.lines.iter().try_fold(Money::ZERO, |total, line| {
            line.subtotal()
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or_else(|| {
                    Report::new(KernelError::Validation).attach_printable("Cart total overflowed")
                })
        })
    }
}
