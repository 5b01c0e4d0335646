use error_stack::Report;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::prelude::entity::{BookId, Cart, Quantity};
use kernel::KernelError;

use crate::transfer::{AddToCartDto, CartDto};

#[async_trait::async_trait]
pub trait AddToCartService: 'static + Sync + Send + DependOnBookQuery {
    /// Adds a line against the book's current catalog state. Removal and
    /// clearing need no catalog access and are done on the [`Cart`] directly.
    async fn add_to_cart(
        &self,
        cart: &mut Cart,
        dto: AddToCartDto,
    ) -> error_stack::Result<CartDto, KernelError> {
        let quantity = Quantity::try_new(dto.quantity).ok_or_else(|| {
            Report::new(KernelError::Validation)
                .attach_printable(format!("Quantity must be positive: {}", dto.quantity))
        })?;
        let id = BookId::new(dto.book_id);
        let mut connection = self.database_connection().transact().await?;
        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach(id.clone())
                    .attach_printable(format!("Book {id} not found"))
            })?;
        cart.add(&book, quantity)?;
        CartDto::try_from(&*cart)
    }
}

impl<T> AddToCartService for T where T: DependOnBookQuery {}
